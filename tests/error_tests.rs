// SPDX-License-Identifier: MIT

//! Error taxonomy to HTTP status mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use couplet_api::error::AppError;

fn status_of(err: AppError) -> StatusCode {
    err.into_response().status()
}

#[test]
fn test_client_errors() {
    assert_eq!(
        status_of(AppError::Validation("bad".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(AppError::IdentityConflict("EMAIL_EXISTS".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(AppError::Authentication("INVALID_PASSWORD".to_string())),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(status_of(AppError::MissingToken), StatusCode::UNAUTHORIZED);
    assert_eq!(
        status_of(AppError::InvalidToken("expired".to_string())),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(AppError::NotFound("User u1 not found".to_string())),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_server_errors() {
    assert_eq!(
        status_of(AppError::Storage("upload failed".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(AppError::Upstream("HTTP 502".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(AppError::Database("offline".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(AppError::Internal(anyhow::anyhow!("boom"))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_server_error_details_are_hidden() {
    let response = AppError::Database("connection string with secrets".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["error"], "database_error");
    assert!(value.get("details").is_none());
}

#[tokio::test]
async fn test_client_error_details_surface_provider_message() {
    let response = AppError::IdentityConflict("EMAIL_EXISTS".to_string()).into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["error"], "identity_conflict");
    assert_eq!(value["details"], "EMAIL_EXISTS");
}

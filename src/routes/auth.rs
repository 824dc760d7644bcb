// SPDX-License-Identifier: MIT

//! Signup and login routes (Credential Gateway).

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationError};

use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::time_utils::{format_utc_rfc3339, parse_utc_date_only};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/signIn", post(sign_in))
        .route("/api/user/login", post(login))
}

fn validate_iso_date(value: &str) -> std::result::Result<(), ValidationError> {
    if parse_utc_date_only(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso_date"))
    }
}

// ─── Signup ──────────────────────────────────────────────────

/// Signup payload. Missing string fields deserialize as empty and are
/// rejected by validation, so schema violations always map to 400.
#[derive(Deserialize, Validate)]
pub struct SignInRequest {
    #[serde(default)]
    #[validate(email)]
    email: String,
    #[serde(default)]
    #[validate(length(min = 8, max = 72))]
    password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    name: String,
    #[serde(default)]
    #[validate(custom(function = validate_iso_date))]
    birthday: String,
    #[serde(default, rename = "partnerBirthday")]
    #[validate(custom(function = validate_iso_date))]
    partner_birthday: String,
    #[serde(default, rename = "startDate")]
    #[validate(custom(function = validate_iso_date))]
    start_date: String,
    /// Optional photo URI to attach to the identity record
    #[serde(default)]
    #[validate(url)]
    photo: Option<String>,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserSummary,
    /// Present when the photo attach sub-step failed non-fatally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Serialize)]
pub struct UserSummary {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub birthday: String,
    #[serde(rename = "partnerBirthday")]
    pub partner_birthday: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Create an account with the identity provider and write the profile.
///
/// Account creation always precedes profile I/O, and the photo attach (if
/// requested) precedes the profile write so the confirmed URL is persisted
/// together with the rest of the profile.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignInRequest>,
) -> Result<(StatusCode, Json<SignInResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // 1) Create the account; provider rejections surface verbatim.
    let session = state
        .identity
        .sign_up(&payload.email, &payload.password)
        .await?;
    let uid = session.local_id.clone();

    tracing::info!(uid = %uid, "Account created");

    // 2) Attach the photo to the identity record. Non-fatal: the account
    //    already exists and is not rolled back for a missing photo.
    let mut photo_url = None;
    let mut warning = None;
    if let Some(photo) = &payload.photo {
        match state
            .identity
            .update_photo_url(&session.id_token, photo)
            .await
        {
            Ok(()) => photo_url = Some(photo.clone()),
            Err(e) => {
                tracing::warn!(uid = %uid, error = %e, "Photo attach failed during signup");
                warning = Some(
                    "Profile photo could not be attached; the account was created without it."
                        .to_string(),
                );
            }
        }
    }

    // 3) Write the profile document keyed by the provider uid.
    let ts = format_utc_rfc3339(Utc::now());
    let profile = UserProfile {
        uid: uid.clone(),
        email: Some(payload.email.clone()),
        name: Some(payload.name.clone()),
        birthday: Some(payload.birthday.clone()),
        partner_birthday: Some(payload.partner_birthday.clone()),
        start_date: Some(payload.start_date.clone()),
        photo_url: photo_url.clone(),
        photo_storage_path: None,
        created_at: ts.clone(),
        updated_at: ts,
    };

    if let Err(db_err) = state.db.upsert_profile(&profile).await {
        // Compensating action: the identity record without a profile is an
        // orphan, so delete it before surfacing the failure.
        match state.identity.delete_account(&session.id_token).await {
            Ok(()) => {
                tracing::warn!(uid = %uid, "Rolled back identity record after profile write failure")
            }
            Err(e) => {
                tracing::error!(uid = %uid, error = %e, "Identity rollback failed; orphan record remains")
            }
        }
        return Err(db_err);
    }

    Ok((
        StatusCode::CREATED,
        Json(SignInResponse {
            token: session.id_token,
            user: UserSummary {
                uid,
                email: payload.email,
                name: payload.name,
                birthday: payload.birthday,
                partner_birthday: payload.partner_birthday,
                start_date: payload.start_date,
                photo_url,
            },
            warning,
        }),
    ))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email)]
    email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: String,
}

/// Verify credentials and issue the provider's session tokens.
///
/// A missing profile document is back-filled with a minimal stub; neither
/// its absence nor a failed stub write blocks the login.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = state
        .identity
        .sign_in_with_password(&payload.email, &payload.password)
        .await?;

    match state.db.get_profile(&session.local_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let stub = UserProfile::stub(&session.local_id, &payload.email, Utc::now());
            if let Err(e) = state.db.upsert_profile(&stub).await {
                tracing::warn!(uid = %session.local_id, error = %e, "Profile stub write failed during login");
            }
        }
        Err(e) => {
            tracing::warn!(uid = %session.local_id, error = %e, "Profile lookup failed during login");
        }
    }

    Ok(Json(LoginResponse {
        token: session.id_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
    }))
}

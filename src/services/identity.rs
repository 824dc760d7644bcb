// SPDX-License-Identifier: MIT

//! Identity Toolkit REST client.
//!
//! Handles:
//! - Account creation (signUp)
//! - Password verification (signInWithPassword)
//! - Attaching a photo URL to the identity record
//! - Compensating account deletion when a signup cannot be completed
//!
//! Tokens are minted and verified entirely by the identity provider; this
//! client never issues credentials of its own.

use crate::error::AppError;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Identity Toolkit REST client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new client with the project's web API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom endpoint (tests, Auth emulator).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create an account, returning the provider-issued uid and tokens.
    ///
    /// Provider rejections (EMAIL_EXISTS, WEAK_PASSWORD, ...) surface
    /// verbatim; there is no retry.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SessionTokens, AppError> {
        let url = format!("{}/accounts:signUp?key={}", self.base_url, self.api_key);

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("signUp request failed: {}", e)))?;

        if !response.status().is_success() {
            let message = provider_error_message(response).await;
            return Err(AppError::IdentityConflict(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("signUp response parse error: {}", e)))
    }

    /// Verify email/password credentials, returning a fresh session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, AppError> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            self.base_url, self.api_key
        );

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("signIn request failed: {}", e)))?;

        if !response.status().is_success() {
            let message = provider_error_message(response).await;
            return Err(AppError::Authentication(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("signIn response parse error: {}", e)))
    }

    /// Attach a photo URL to the identity record owned by `id_token`.
    pub async fn update_photo_url(&self, id_token: &str, photo_url: &str) -> Result<(), AppError> {
        let url = format!("{}/accounts:update?key={}", self.base_url, self.api_key);

        let body = serde_json::json!({
            "idToken": id_token,
            "photoUrl": photo_url,
            "returnSecureToken": false
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("accounts:update request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let message = provider_error_message(response).await;
            return Err(AppError::Internal(anyhow::anyhow!(
                "accounts:update rejected: {}",
                message
            )));
        }

        Ok(())
    }

    /// Delete the account owned by `id_token`.
    ///
    /// Used as the compensating action when the profile write after a
    /// signup fails, so no orphaned identity record is left behind.
    pub async fn delete_account(&self, id_token: &str) -> Result<(), AppError> {
        let url = format!("{}/accounts:delete?key={}", self.base_url, self.api_key);

        let body = serde_json::json!({ "idToken": id_token });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("accounts:delete request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let message = provider_error_message(response).await;
            return Err(AppError::Internal(anyhow::anyhow!(
                "accounts:delete rejected: {}",
                message
            )));
        }

        Ok(())
    }
}

/// Session issued by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTokens {
    /// Provider-issued uid (document key for the profile store)
    #[serde(rename = "localId")]
    pub local_id: String,
    /// Bearer token for subsequent requests
    #[serde(rename = "idToken")]
    pub id_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    /// Lifetime in seconds, as a decimal string (provider format)
    #[serde(rename = "expiresIn")]
    pub expires_in: String,
}

/// Extract the provider's error message from a non-success response.
///
/// The Identity Toolkit wraps failures as `{"error": {"message": "..."}}`;
/// anything else falls back to the HTTP status line.
async fn provider_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    parse_provider_error(&body).unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

fn parse_provider_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

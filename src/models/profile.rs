//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

use crate::time_utils::format_utc_rfc3339;

/// User profile stored in Firestore, keyed by the identity provider uid.
///
/// Optional fields are omitted from the stored document when absent, so a
/// login-created stub contains exactly `uid`, `email`, `createdAt` and
/// `updatedAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity provider uid (also used as document ID)
    pub uid: String,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Own birthday (ISO-8601 date string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Partner's birthday (ISO-8601 date string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "partnerBirthday")]
    pub partner_birthday: Option<String>,
    /// Relationship start date (ISO-8601 date string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Public download URL of the profile photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Storage object path of the photo (internal, never sent to clients)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "photoStoragePath")]
    pub photo_storage_path: Option<String>,
    /// When the profile was first created (RFC3339)
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Last modification timestamp (RFC3339)
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl UserProfile {
    /// Minimal stub written on first login when no profile document exists.
    pub fn stub(uid: &str, email: &str, now: chrono::DateTime<chrono::Utc>) -> Self {
        let ts = format_utc_rfc3339(now);
        Self {
            uid: uid.to_string(),
            email: Some(email.to_string()),
            name: None,
            birthday: None,
            partner_birthday: None,
            start_date: None,
            photo_url: None,
            photo_storage_path: None,
            created_at: ts.clone(),
            updated_at: ts,
        }
    }
}

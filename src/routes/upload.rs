// SPDX-License-Identifier: MIT

//! Profile photo upload route.
//!
//! The upload sequence is strictly ordered: read the current profile for
//! the previous storage path, write the new object, update the identity
//! record, merge the profile document, then best-effort delete the old
//! object. The steps are not atomic with respect to each other; a crash
//! mid-sequence leaves partial state.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::time_utils::{format_utc_rfc3339, now_unix_millis};
use crate::AppState;

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024; // 5MB

/// Upload route (requires authentication).
/// The auth middleware is applied in routes/mod.rs for this route.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/uploadPhoto", post(upload_photo))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

#[derive(Serialize)]
pub struct UploadResponse {
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Pull the `file` field out of the multipart payload.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("upload.jpg").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file field: {e}")))?
            .to_vec();

        return Ok(Some(UploadedFile {
            name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// Storage object path for a new photo, namespaced by uid and timestamp so
/// concurrent uploads from the same user never collide.
fn object_path(uid: &str, millis: i64, original_name: &str) -> String {
    format!("profile/{}/{}_{}", uid, millis, original_name)
}

/// The old object to clean up, if any. Identical paths are never deleted.
fn previous_path_to_delete<'a>(before: Option<&'a str>, new_path: &str) -> Option<&'a str> {
    before.filter(|b| *b != new_path)
}

/// Upload a profile photo and point the identity record and profile
/// document at it.
async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let Some(file) = read_file_field(&mut multipart).await? else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };

    // Capture the previous storage path before anything is overwritten.
    let existing = state.db.get_profile(&user.uid).await?;
    let before_path = existing
        .as_ref()
        .and_then(|p| p.photo_storage_path.clone());

    let storage_path = object_path(&user.uid, now_unix_millis(), &file.name);
    let download_token = Uuid::new_v4().to_string();

    state
        .storage
        .upload_object(
            &storage_path,
            file.bytes,
            &file.content_type,
            &download_token,
        )
        .await?;

    let photo_url = state.storage.download_url(&storage_path, &download_token);

    // Point the identity record at the new photo on behalf of the caller.
    state
        .identity
        .update_photo_url(&user.id_token, &photo_url)
        .await?;

    let now = Utc::now();
    let mut profile = existing.unwrap_or_else(|| {
        let ts = format_utc_rfc3339(now);
        UserProfile {
            uid: user.uid.clone(),
            email: user.email.clone(),
            name: None,
            birthday: None,
            partner_birthday: None,
            start_date: None,
            photo_url: None,
            photo_storage_path: None,
            created_at: ts.clone(),
            updated_at: ts,
        }
    });
    profile.photo_url = Some(photo_url.clone());
    profile.photo_storage_path = Some(storage_path.clone());
    profile.updated_at = format_utc_rfc3339(now);

    state.db.upsert_profile(&profile).await?;

    // Replaced photos are cleaned up best-effort; the response is already
    // decided at this point.
    if let Some(old_path) = previous_path_to_delete(before_path.as_deref(), &storage_path) {
        match state.storage.delete_object(old_path).await {
            Ok(()) => {
                tracing::debug!(uid = %user.uid, path = old_path, "Deleted previous profile photo")
            }
            Err(e) => {
                tracing::warn!(uid = %user.uid, path = old_path, error = %e, "Failed to delete previous profile photo")
            }
        }
    }

    Ok((StatusCode::CREATED, Json(UploadResponse { photo_url })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_is_namespaced_by_uid_and_timestamp() {
        let path = object_path("uid-1", 1_755_400_000_000, "me.jpg");
        assert_eq!(path, "profile/uid-1/1755400000000_me.jpg");
    }

    #[test]
    fn previous_path_only_deleted_when_different() {
        assert_eq!(previous_path_to_delete(None, "profile/u/2_b.jpg"), None);
        assert_eq!(
            previous_path_to_delete(Some("profile/u/1_a.jpg"), "profile/u/2_b.jpg"),
            Some("profile/u/1_a.jpg")
        );
        assert_eq!(
            previous_path_to_delete(Some("profile/u/2_b.jpg"), "profile/u/2_b.jpg"),
            None
        );
    }
}

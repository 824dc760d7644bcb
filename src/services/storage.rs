// SPDX-License-Identifier: MIT

//! Cloud Storage client for profile photos.
//!
//! Objects are written through the JSON API with a
//! `firebaseStorageDownloadTokens` metadata entry, which makes them
//! reachable through the Firebase download URL format without touching the
//! bucket ACLs. Credentials come from Application Default Credentials via
//! the shared token generator.

use crate::error::AppError;
use std::sync::Arc;

const UPLOAD_BASE_URL: &str = "https://storage.googleapis.com/upload/storage/v1";
const API_BASE_URL: &str = "https://storage.googleapis.com/storage/v1";
const DOWNLOAD_HOST: &str = "https://firebasestorage.googleapis.com";
const PHOTO_CACHE_CONTROL: &str = "public,max-age=31536000";

/// Cloud Storage client bound to one bucket.
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    bucket: String,
    upload_base_url: String,
    api_base_url: String,
    token_generator: Option<Arc<gcloud_sdk::GoogleAuthTokenGenerator>>,
}

impl StorageClient {
    /// Create a client using Application Default Credentials.
    pub async fn new(bucket: &str) -> Result<Self, AppError> {
        let generator = gcloud_sdk::GoogleAuthTokenGenerator::new(
            gcloud_sdk::TokenSourceType::Default,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
        )
        .await
        .map_err(|e| AppError::Storage(format!("Failed to initialize storage credentials: {e}")))?;

        tracing::info!(bucket, "Storage client initialized");

        Ok(Self {
            http: reqwest::Client::new(),
            bucket: bucket.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
            token_generator: Some(Arc::new(generator)),
        })
    }

    /// Create a mock storage client for testing (offline mode).
    ///
    /// All storage operations will return an error if called.
    pub fn new_mock(bucket: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            bucket: bucket.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
            token_generator: None,
        }
    }

    /// Bucket this client writes to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn auth_header(&self) -> Result<String, AppError> {
        let generator = self.token_generator.as_ref().ok_or_else(|| {
            AppError::Storage("Storage not connected (offline mode)".to_string())
        })?;

        let token = generator
            .create_token()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to obtain storage token: {e}")))?;

        Ok(format!(
            "{} {}",
            token.token_type,
            token.token.as_sensitive_str()
        ))
    }

    /// Upload an object with a Firebase download token attached as metadata.
    ///
    /// Uses a single multipart/related request so the object and its
    /// metadata land atomically.
    pub async fn upload_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        download_token: &str,
    ) -> Result<(), AppError> {
        let auth = self.auth_header().await?;

        let metadata = serde_json::json!({
            "name": path,
            "contentType": content_type,
            "cacheControl": PHOTO_CACHE_CONTROL,
            "metadata": { "firebaseStorageDownloadTokens": download_token },
        });

        let boundary = format!("part_{}", uuid::Uuid::new_v4().simple());
        let body = build_multipart_related(&boundary, &metadata.to_string(), content_type, &bytes);

        let url = format!(
            "{}/b/{}/o?uploadType=multipart",
            self.upload_base_url, self.bucket
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Upload request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!("HTTP {}: {}", status, body)));
        }

        tracing::debug!(path, "Object uploaded");
        Ok(())
    }

    /// Delete an object by path.
    ///
    /// Callers treat this as best-effort cleanup; the error is returned so
    /// they can log the outcome, never to fail the request.
    pub async fn delete_object(&self, path: &str) -> Result<(), AppError> {
        let auth = self.auth_header().await?;

        let url = format!(
            "{}/b/{}/o/{}",
            self.api_base_url,
            self.bucket,
            urlencoding::encode(path)
        );

        let response = self
            .http
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Delete request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Public download URL for an uploaded object.
    ///
    /// The format is fixed by the download endpoint: the path is
    /// URL-encoded as a single segment and the token authorizes access.
    pub fn download_url(&self, path: &str, download_token: &str) -> String {
        format!(
            "{}/v0/b/{}/o/{}?alt=media&token={}",
            DOWNLOAD_HOST,
            self.bucket,
            urlencoding::encode(path),
            download_token
        )
    }
}

fn build_multipart_related(
    boundary: &str,
    metadata_json: &str,
    content_type: &str,
    bytes: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + metadata_json.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata_json}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: {content_type}\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_url_encodes_path_as_single_segment() {
        let client = StorageClient::new_mock("my-bucket.appspot.com");
        let url = client.download_url("profile/uid-1/123_me.jpg", "tok-42");

        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/my-bucket.appspot.com/o/profile%2Fuid-1%2F123_me.jpg?alt=media&token=tok-42"
        );
    }

    #[test]
    fn multipart_body_contains_both_parts_in_order() {
        let body = build_multipart_related("b1", r#"{"name":"p"}"#, "image/png", b"\x89PNG");
        let text = String::from_utf8_lossy(&body);

        let metadata_at = text.find(r#"{"name":"p"}"#).unwrap();
        let file_at = text.find("image/png").unwrap();
        assert!(metadata_at < file_at);
        assert!(text.ends_with("\r\n--b1--\r\n"));
    }

    #[tokio::test]
    async fn offline_client_refuses_operations() {
        let client = StorageClient::new_mock("bucket");
        let err = client
            .upload_object("p", vec![1, 2, 3], "image/jpeg", "tok")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));

        let err = client.delete_object("p").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}

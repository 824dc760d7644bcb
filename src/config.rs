//! Application configuration loaded from environment variables.
//!
//! Service-account credentials are never read here: the Firestore and
//! Storage clients resolve them through Application Default Credentials
//! (`GOOGLE_APPLICATION_CREDENTIALS` or the ambient environment).

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity Toolkit web API key
    pub firebase_web_api_key: String,
    /// GCP project ID (Firestore project, token issuer/audience)
    pub gcp_project_id: String,
    /// Cloud Storage bucket for profile photos
    pub storage_bucket: String,
    /// Base URL of the external AI recommendation server
    pub ai_server_url: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            firebase_web_api_key: env::var("FIREBASE_WEB_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_WEB_API_KEY"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?,
            storage_bucket: env::var("FIREBASE_STORAGE_BUCKET")
                .map_err(|_| ConfigError::Missing("FIREBASE_STORAGE_BUCKET"))?,
            ai_server_url: env::var("AI_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .unwrap_or(4000),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            firebase_web_api_key: "test_api_key".to_string(),
            gcp_project_id: "test-project".to_string(),
            storage_bucket: "test-project.appspot.com".to_string(),
            ai_server_url: "http://localhost:5000".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 4000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

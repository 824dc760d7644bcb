// SPDX-License-Identifier: MIT

use couplet_api::config::Config;
use couplet_api::db::FirestoreDb;
use couplet_api::routes::create_router;
use couplet_api::services::{
    FirebaseTokenVerifier, IdentityClient, RecommendClient, StorageClient,
};
use couplet_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Create a mock database connection (offline).
///
/// Any database operation errors, so a request that should reject before
/// touching the profile store produces its own status rather than a 500.
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let storage = StorageClient::new_mock(&config.storage_bucket);

    // Point the REST clients at an unroutable local port; tests that are
    // expected to reject before any external call never reach it.
    let identity = IdentityClient::with_base_url(
        config.firebase_web_api_key.clone(),
        "http://127.0.0.1:9".to_string(),
    );
    let recommender = RecommendClient::new("http://127.0.0.1:9".to_string());

    let token_verifier = Arc::new(
        FirebaseTokenVerifier::new(&config.gcp_project_id)
            .expect("Failed to build test verifier"),
    );

    let state = Arc::new(AppState {
        config,
        db,
        identity,
        storage,
        recommender,
        token_verifier,
    });

    (create_router(state.clone()), state)
}

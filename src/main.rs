// SPDX-License-Identifier: MIT

//! Couplet API Server
//!
//! Backend-for-frontend for a couples app: proxies authentication to the
//! Firebase Identity Toolkit, stores profile documents in Firestore,
//! uploads profile photos to Cloud Storage and forwards recommendation
//! requests to an external AI service.

use couplet_api::{
    config::Config,
    db::FirestoreDb,
    services::{FirebaseTokenVerifier, IdentityClient, RecommendClient, StorageClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Couplet API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize Cloud Storage client
    let storage = StorageClient::new(&config.storage_bucket)
        .await
        .expect("Failed to initialize storage client");

    // Identity Toolkit REST client
    let identity = IdentityClient::new(config.firebase_web_api_key.clone());

    // AI recommendation proxy client
    let recommender = RecommendClient::new(config.ai_server_url.clone());

    // ID token verifier for the bearer token gate
    let token_verifier = Arc::new(
        FirebaseTokenVerifier::new(&config.gcp_project_id)
            .expect("Failed to initialize token verifier"),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity,
        storage,
        recommender,
        token_verifier,
    });

    // Build router
    let app = couplet_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("couplet_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

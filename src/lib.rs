// SPDX-License-Identifier: MIT

//! Couplet API: backend-for-frontend for a couples app.
//!
//! This crate proxies authentication to the Firebase Identity Toolkit,
//! stores one profile document per user in Firestore, uploads profile
//! photos to Cloud Storage, and forwards recommendation requests to an
//! external AI service.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use services::{FirebaseTokenVerifier, IdentityClient, RecommendClient, StorageClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
    pub storage: StorageClient,
    pub recommender: RecommendClient,
    pub token_verifier: Arc<FirebaseTokenVerifier>,
}

// SPDX-License-Identifier: MIT

//! Services module - clients for the external collaborators.

pub mod identity;
pub mod recommend;
pub mod storage;
pub mod token_verifier;

pub use identity::{IdentityClient, SessionTokens};
pub use recommend::RecommendClient;
pub use storage::StorageClient;
pub use token_verifier::{FirebaseTokenVerifier, VerifiedIdentity};

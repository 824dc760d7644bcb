// SPDX-License-Identifier: MIT

//! Profile routes for authenticated users.

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::time_utils::days_together;
use crate::AppState;

/// Profile routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/mypage", get(get_my_page))
        .route("/api/home", get(get_home))
}

async fn fetch_profile(state: &AppState, uid: &str) -> Result<UserProfile> {
    state
        .db
        .get_profile(uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))
}

// ─── My Page ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MyPageResponse {
    pub name: Option<String>,
    pub birthday: Option<String>,
    #[serde(rename = "partnerBirthday")]
    pub partner_birthday: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "daysTogether")]
    pub days_together: i64,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Get the current user's profile with the derived days-together count.
async fn get_my_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MyPageResponse>> {
    let profile = fetch_profile(&state, &user.uid).await?;

    let days = days_together(profile.start_date.as_deref(), Utc::now().date_naive());

    Ok(Json(MyPageResponse {
        name: profile.name,
        birthday: profile.birthday,
        partner_birthday: profile.partner_birthday,
        start_date: profile.start_date,
        days_together: days,
        photo_url: profile.photo_url,
    }))
}

// ─── Home ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HomeResponse {
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Get the home screen data (currently just the profile photo URL).
async fn get_home(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<HomeResponse>> {
    let profile = fetch_profile(&state, &user.uid).await?;

    Ok(Json(HomeResponse {
        photo_url: profile.photo_url,
    }))
}

// SPDX-License-Identifier: MIT

//! AI recommendation proxy route.

use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::RecommendationRecord;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/ai/recommend", post(recommend))
}

/// Recommendation request. All three fields are required; missing fields
/// deserialize as empty and are rejected before any outbound call.
#[derive(Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    location: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    date: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    time: String,
}

/// Forward a recommendation request to the AI server and archive the
/// result.
///
/// The archive write is best-effort: once the upstream call has succeeded
/// the caller gets the payload back even if the write fails.
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<serde_json::Value>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = state
        .recommender
        .recommend(&payload.location, &payload.date, &payload.time)
        .await?;

    let record = RecommendationRecord {
        location: payload.location,
        date: payload.date,
        time: payload.time,
        places: result
            .get("places")
            .cloned()
            .unwrap_or(serde_json::Value::Null),
        created_at: format_utc_rfc3339(Utc::now()),
    };

    if let Err(e) = state.db.add_recommendation(&record).await {
        tracing::warn!(error = %e, "Failed to archive recommendation; returning result anyway");
    }

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_request_requires_all_fields() {
        let req = RecommendRequest {
            location: "Gangnam Station".to_string(),
            date: "2025-08-17".to_string(),
            time: "15:00".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = RecommendRequest {
            location: String::new(),
            date: "2025-08-17".to_string(),
            time: "15:00".to_string(),
        };
        assert!(req.validate().is_err());
    }
}

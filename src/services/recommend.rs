// SPDX-License-Identifier: MIT

//! Client for the external AI recommendation server.

use crate::error::AppError;

/// Recommendation service client.
#[derive(Clone)]
pub struct RecommendClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecommendClient {
    /// Create a client against the configured recommendation server.
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Forward a {location, date, time} triple and return the raw payload.
    ///
    /// No retry and no timeout beyond the transport defaults; any
    /// non-success status or transport failure surfaces as `Upstream`.
    pub async fn recommend(
        &self,
        location: &str,
        date: &str,
        time: &str,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/recommend", self.base_url);

        let body = serde_json::json!({
            "location": location,
            "date": date,
            "time": time,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
    }
}

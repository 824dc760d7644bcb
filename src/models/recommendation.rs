//! Archived recommendation requests.

use serde::{Deserialize, Serialize};

/// One recommendation request/response pair, archived append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Requested location (free-form, e.g. a station or neighborhood)
    pub location: String,
    /// Requested date
    pub date: String,
    /// Requested time
    pub time: String,
    /// Opaque `places` payload returned by the AI service
    pub places: serde_json::Value,
    /// When the recommendation was archived (RFC3339)
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Custom analytics event, recorded alongside page views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEvent {
    pub id: String,
    pub session_id: String,
    pub event_name: String,

    /// Free-form event properties (JSON object).
    pub properties: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

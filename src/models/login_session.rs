use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login audit record, appended on every successful authentication.
///
/// The trail is append-only and uncapped. Known retention gap, kept
/// as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub login_time: DateTime<Utc>,
    pub user_agent: String,
}

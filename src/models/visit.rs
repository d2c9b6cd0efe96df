use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Referrer value recorded when the page was opened directly.
pub const DIRECT_REFERRER: &str = "direct";

/// One page view in the visit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorSession {
    pub id: String,

    /// Stable for the lifetime of one browser session; correlates
    /// multiple page views into one visit.
    pub session_id: String,

    pub timestamp: DateTime<Utc>,
    pub user_agent: String,

    /// Referrer URL, or [`DIRECT_REFERRER`] when absent.
    pub referrer: String,

    pub page_url: String,

    /// Anonymized visitor hash, derived from user-agent + time. Avoids
    /// storing raw identifying data; not a strong anonymization
    /// guarantee.
    pub ip_hash: String,

    /// Elapsed session time in milliseconds, filled in on session end.
    /// Zero until then.
    pub duration: i64,

    /// True at most once per session per calendar day.
    pub is_unique: bool,
}

/// Visitor/page-view counters for one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    /// Calendar day in ISO form (`YYYY-MM-DD`).
    pub date: String,
    pub visitors: u64,
    pub page_views: u64,
}

//! Session Tracker: turns page-view events into durable visit records
//! and daily counters.
//!
//! The tracker has no event loop of its own. The embedding application
//! wires the trigger points to these methods: one `record_page_view`
//! after construction, `record_session_end` on visibility-change to
//! hidden and on unload.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::PorticoError;
use crate::models::visit::DIRECT_REFERRER;
use crate::models::{DailyStat, TrackedEvent, VisitorSession};
use crate::storage::{StorageBackend, keys, load_collection, store_collection};

/// One page-view event as reported by the embedder.
#[derive(Debug, Clone)]
pub struct PageView {
    pub page_url: String,
    pub user_agent: String,
    /// `None` when the page was opened directly.
    pub referrer: Option<String>,
}

/// Per-browser-session visit tracker.
pub struct SessionTracker {
    storage: Arc<dyn StorageBackend>,
    session_id: String,
    session_start: DateTime<Utc>,
    visit_log_cap: usize,
    daily_retention_days: i64,
    event_log_cap: usize,
}

impl SessionTracker {
    /// Construct the tracker, loading the cached session identifier or
    /// generating and caching a fresh one. The session start instant is
    /// fixed here.
    pub fn new(storage: Arc<dyn StorageBackend>, config: &Config) -> Result<Self, PorticoError> {
        let session_id = match storage.read(keys::SESSION_ID)? {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = Uuid::new_v4().to_string();
                storage.write(keys::SESSION_ID, &id)?;
                id
            }
        };

        Ok(SessionTracker {
            storage,
            session_id,
            session_start: Utc::now(),
            visit_log_cap: config.visit_log_cap,
            daily_retention_days: config.daily_retention_days,
            event_log_cap: config.event_log_cap,
        })
    }

    /// The identifier correlating this session's page views. Stable for
    /// the tracker's lifetime and, through the storage medium, across
    /// reloads within the same browser session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record a page view as of now.
    pub fn record_page_view(&self, view: &PageView) -> Result<VisitorSession, PorticoError> {
        self.record_page_view_at(view, Utc::now())
    }

    /// Record a page view as of an explicit instant.
    ///
    /// Appends a [`VisitorSession`] to the capped visit log and bumps the
    /// day's [`DailyStat`] counters.
    pub fn record_page_view_at(
        &self,
        view: &PageView,
        now: DateTime<Utc>,
    ) -> Result<VisitorSession, PorticoError> {
        let is_unique = self.mark_visit(now.date_naive())?;

        let record = VisitorSession {
            id: Uuid::new_v4().to_string(),
            session_id: self.session_id.clone(),
            timestamp: now,
            user_agent: view.user_agent.clone(),
            referrer: view
                .referrer
                .clone()
                .unwrap_or_else(|| DIRECT_REFERRER.to_string()),
            page_url: view.page_url.clone(),
            ip_hash: visitor_hash(&view.user_agent, now),
            duration: 0,
            is_unique,
        };

        let mut log: Vec<VisitorSession> = load_collection(self.storage.as_ref(), keys::VISIT_LOG);
        log.push(record.clone());
        if log.len() > self.visit_log_cap {
            let excess = log.len() - self.visit_log_cap;
            log.drain(..excess);
        }
        store_collection(self.storage.as_ref(), keys::VISIT_LOG, &log)?;

        self.update_daily_stats(now.date_naive())?;

        Ok(record)
    }

    /// Fill in the duration of this session's most recent visit record.
    /// Silent no-op when the session has no record in the log.
    pub fn record_session_end(&self) -> Result<(), PorticoError> {
        self.record_session_end_at(Utc::now())
    }

    /// `record_session_end` with an explicit end instant.
    pub fn record_session_end_at(&self, now: DateTime<Utc>) -> Result<(), PorticoError> {
        let mut log: Vec<VisitorSession> = load_collection(self.storage.as_ref(), keys::VISIT_LOG);

        let Some(current) = log
            .iter_mut()
            .rev()
            .find(|s| s.session_id == self.session_id)
        else {
            debug!(session_id = %self.session_id, "session end with no visit record, ignoring");
            return Ok(());
        };

        current.duration = (now - self.session_start).num_milliseconds();
        store_collection(self.storage.as_ref(), keys::VISIT_LOG, &log)
    }

    /// Record a custom event (capped log, oldest evicted).
    pub fn record_event(
        &self,
        event_name: &str,
        properties: serde_json::Value,
    ) -> Result<TrackedEvent, PorticoError> {
        self.record_event_at(event_name, properties, Utc::now())
    }

    /// `record_event` with an explicit timestamp.
    pub fn record_event_at(
        &self,
        event_name: &str,
        properties: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<TrackedEvent, PorticoError> {
        let event = TrackedEvent {
            id: Uuid::new_v4().to_string(),
            session_id: self.session_id.clone(),
            event_name: event_name.to_string(),
            properties,
            timestamp: now,
        };

        let mut events: Vec<TrackedEvent> = load_collection(self.storage.as_ref(), keys::EVENTS);
        events.push(event.clone());
        if events.len() > self.event_log_cap {
            let excess = events.len() - self.event_log_cap;
            events.drain(..excess);
        }
        store_collection(self.storage.as_ref(), keys::EVENTS, &events)?;

        Ok(event)
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Uniqueness rule: a visit is unique when the stored visit-day
    /// marker differs from today, and recording always moves the marker
    /// to today. At most one page view per calendar day comes back
    /// unique.
    fn mark_visit(&self, today: NaiveDate) -> Result<bool, PorticoError> {
        let today_str = today.format("%Y-%m-%d").to_string();
        let last_visit = self.storage.read(keys::LAST_VISIT)?;
        let unique = last_visit.as_deref() != Some(today_str.as_str());
        self.storage.write(keys::LAST_VISIT, &today_str)?;
        Ok(unique)
    }

    /// Bump today's counters, creating the day record if absent.
    ///
    /// A new day record starts at `visitors = 1`; later views the same
    /// day only increment `page_views`, because the visit-day marker has
    /// already moved to today by the time this runs.
    fn update_daily_stats(&self, today: NaiveDate) -> Result<(), PorticoError> {
        let today_str = today.format("%Y-%m-%d").to_string();
        let mut stats: Vec<DailyStat> = load_collection(self.storage.as_ref(), keys::DAILY_STATS);

        match stats.iter_mut().find(|s| s.date == today_str) {
            Some(day) => day.page_views += 1,
            None => stats.push(DailyStat {
                date: today_str,
                visitors: 1,
                page_views: 1,
            }),
        }

        let cutoff = today - Duration::days(self.daily_retention_days);
        stats.retain(|s| match NaiveDate::parse_from_str(&s.date, "%Y-%m-%d") {
            Ok(date) => date >= cutoff,
            Err(_) => false,
        });

        store_collection(self.storage.as_ref(), keys::DAILY_STATS, &stats)
    }
}

/// Anonymized visitor hash: user-agent plus the current time, digested
/// and truncated. Only here to avoid storing raw identifying data.
fn visitor_hash(user_agent: &str, now: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_agent.as_bytes());
    hasher.update(now.timestamp_millis().to_string().as_bytes());
    let mut hash = hex::encode(hasher.finalize());
    hash.truncate(16);
    hash
}

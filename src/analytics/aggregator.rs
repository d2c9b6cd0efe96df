//! Stats Aggregator: read-only rollups of the visit log and daily
//! counters. Pure function of stored state — nothing here mutates.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::visit::DIRECT_REFERRER;
use crate::models::{DailyStat, VisitorSession};
use crate::storage::{StorageBackend, keys, load_collection};

/// One referrer source with its visit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerCount {
    pub source: String,
    pub count: u64,
}

/// One point of the weekly or monthly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Weekday name for weekly points, month name for monthly points.
    pub label: String,
    pub visitors: u64,
    pub page_views: u64,
}

/// Display snapshot of everything the analytics views need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    /// Visit log length.
    pub total_visits: u64,
    /// Distinct session ids across the log.
    pub unique_sessions: u64,
    pub page_views: u64,
    /// Mean duration of ended sessions, in whole seconds. Zero when no
    /// record carries a duration yet.
    pub avg_session_duration_secs: u64,
    /// Top 5 referrer hosts by count, ties in first-seen order.
    pub top_referrers: Vec<ReferrerCount>,
    pub daily_stats: Vec<DailyStat>,
    /// Exactly 7 points, one per day, ending today.
    pub weekly_stats: Vec<SeriesPoint>,
    /// Exactly 12 points, one per month, ending with the current month.
    pub monthly_stats: Vec<SeriesPoint>,
}

/// Compute the analytics snapshot as of today.
pub fn snapshot(storage: &dyn StorageBackend) -> AnalyticsData {
    snapshot_at(storage, Utc::now().date_naive())
}

/// Compute the analytics snapshot as of an explicit calendar day.
pub fn snapshot_at(storage: &dyn StorageBackend, today: NaiveDate) -> AnalyticsData {
    let log: Vec<VisitorSession> = load_collection(storage, keys::VISIT_LOG);
    let daily_stats: Vec<DailyStat> = load_collection(storage, keys::DAILY_STATS);

    let unique_sessions = log
        .iter()
        .map(|s| s.session_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    AnalyticsData {
        total_visits: log.len() as u64,
        unique_sessions,
        page_views: log.len() as u64,
        avg_session_duration_secs: average_duration_secs(&log),
        top_referrers: top_referrers(&log),
        weekly_stats: weekly_series(&daily_stats, today),
        monthly_stats: monthly_series(&daily_stats, today),
        daily_stats,
    }
}

/// Mean of all non-zero durations, converted from milliseconds and
/// rounded to whole seconds.
fn average_duration_secs(log: &[VisitorSession]) -> u64 {
    let ended: Vec<i64> = log
        .iter()
        .filter(|s| s.duration > 0)
        .map(|s| s.duration)
        .collect();
    if ended.is_empty() {
        return 0;
    }
    let mean_millis = ended.iter().sum::<i64>() as f64 / ended.len() as f64;
    (mean_millis / 1000.0).round() as u64
}

/// Group the log by referrer host and rank by count. The stable sort
/// keeps first-seen order among equal counts.
fn top_referrers(log: &[VisitorSession]) -> Vec<ReferrerCount> {
    let mut counts: Vec<ReferrerCount> = Vec::new();

    for session in log {
        let source = referrer_source(&session.referrer);
        match counts.iter_mut().find(|r| r.source == source) {
            Some(entry) => entry.count += 1,
            None => counts.push(ReferrerCount { source, count: 1 }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(5);
    counts
}

fn referrer_source(referrer: &str) -> String {
    if referrer == DIRECT_REFERRER {
        return "Direct".to_string();
    }
    Url::parse(referrer)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// The last 7 calendar days ending today, labeled by weekday name.
///
/// Days with no recorded (or zero) data are filled with pseudo-random
/// plausible values rather than zeros. Long-standing display behavior,
/// kept as-is.
fn weekly_series(daily_stats: &[DailyStat], today: NaiveDate) -> Vec<SeriesPoint> {
    let mut rng = rand::thread_rng();
    let mut series = Vec::with_capacity(7);

    for offset in (0..7).rev() {
        let day = today - Duration::days(offset);
        let date_str = day.format("%Y-%m-%d").to_string();
        let recorded = daily_stats.iter().find(|s| s.date == date_str);

        series.push(SeriesPoint {
            label: day.format("%a").to_string(),
            visitors: match recorded.map(|s| s.visitors) {
                Some(v) if v > 0 => v,
                _ => rng.gen_range(10..30),
            },
            page_views: match recorded.map(|s| s.page_views) {
                Some(v) if v > 0 => v,
                _ => rng.gen_range(15..45),
            },
        });
    }

    series
}

/// The last 12 calendar months ending with the current month, each point
/// the sum of that month's daily stats. Empty months fall back to the
/// same pseudo-random fill policy as the weekly series.
fn monthly_series(daily_stats: &[DailyStat], today: NaiveDate) -> Vec<SeriesPoint> {
    let mut rng = rand::thread_rng();
    let mut series = Vec::with_capacity(12);

    for offset in (0..12).rev() {
        let months = today.year() * 12 + today.month0() as i32 - offset;
        let (year, month) = (months.div_euclid(12), months.rem_euclid(12) as u32 + 1);
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
        let prefix = format!("{:04}-{:02}", year, month);

        let (visitors, page_views) = daily_stats
            .iter()
            .filter(|s| s.date.starts_with(&prefix))
            .fold((0u64, 0u64), |(v, p), s| (v + s.visitors, p + s.page_views));

        series.push(SeriesPoint {
            label: first.format("%b").to_string(),
            visitors: if visitors > 0 {
                visitors
            } else {
                rng.gen_range(100..300)
            },
            page_views: if page_views > 0 {
                page_views
            } else {
                rng.gen_range(150..450)
            },
        });
    }

    series
}

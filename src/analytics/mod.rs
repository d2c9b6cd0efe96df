pub mod aggregator;
pub mod tracker;

pub use aggregator::{AnalyticsData, ReferrerCount, SeriesPoint, snapshot, snapshot_at};
pub use tracker::{PageView, SessionTracker};

use chrono::{Datelike, Utc};
use portico_core::analytics::{snapshot, snapshot_at};
use portico_core::models::{DailyStat, VisitorSession};
use portico_core::storage::{MemoryStorage, StorageBackend, keys, store_collection};

fn visit(session_id: &str, referrer: &str, duration: i64) -> VisitorSession {
    VisitorSession {
        id: uuid::Uuid::new_v4().to_string(),
        session_id: session_id.to_string(),
        timestamp: Utc::now(),
        user_agent: "test-agent".to_string(),
        referrer: referrer.to_string(),
        page_url: "/".to_string(),
        ip_hash: "0123456789abcdef".to_string(),
        duration,
        is_unique: false,
    }
}

// ═══ Totals ═══

#[test]
fn test_empty_storage_snapshot() {
    let storage = MemoryStorage::new();
    let data = snapshot(&storage);

    assert_eq!(data.total_visits, 0);
    assert_eq!(data.unique_sessions, 0);
    assert_eq!(data.page_views, 0);
    assert_eq!(data.avg_session_duration_secs, 0);
    assert!(data.top_referrers.is_empty());
    assert!(data.daily_stats.is_empty());
}

#[test]
fn test_totals_and_unique_sessions() {
    let storage = MemoryStorage::new();
    let log = vec![
        visit("s1", "direct", 0),
        visit("s1", "direct", 0),
        visit("s2", "direct", 0),
    ];
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    let data = snapshot(&storage);
    assert_eq!(data.total_visits, 3);
    assert_eq!(data.page_views, 3);
    assert_eq!(data.unique_sessions, 2);
}

#[test]
fn test_average_duration_ignores_open_sessions() {
    let storage = MemoryStorage::new();
    let log = vec![
        visit("s1", "direct", 2000),
        visit("s2", "direct", 4000),
        visit("s3", "direct", 0),
    ];
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    // Mean of 2000ms and 4000ms, in whole seconds.
    assert_eq!(snapshot(&storage).avg_session_duration_secs, 3);
}

// ═══ Top referrers ═══

#[test]
fn test_top_referrers_grouped_by_host_and_ranked() {
    let storage = MemoryStorage::new();
    let log = vec![
        visit("s1", "https://google.com/search?q=a", 0),
        visit("s2", "https://google.com/search?q=b", 0),
        visit("s3", "direct", 0),
        visit("s4", "https://news.ycombinator.com/item", 0),
    ];
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    let referrers = snapshot(&storage).top_referrers;
    assert_eq!(referrers[0].source, "google.com");
    assert_eq!(referrers[0].count, 2);
    assert_eq!(referrers.len(), 3);
}

#[test]
fn test_top_referrers_ties_keep_first_seen_order() {
    let storage = MemoryStorage::new();
    let log = vec![
        visit("s1", "https://a.example/", 0),
        visit("s2", "https://b.example/", 0),
    ];
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    let referrers = snapshot(&storage).top_referrers;
    assert_eq!(referrers[0].source, "a.example");
    assert_eq!(referrers[1].source, "b.example");
}

#[test]
fn test_top_referrers_direct_and_unknown_buckets() {
    let storage = MemoryStorage::new();
    let log = vec![
        visit("s1", "direct", 0),
        visit("s2", "not a url", 0),
    ];
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    let referrers = snapshot(&storage).top_referrers;
    let sources: Vec<&str> = referrers.iter().map(|r| r.source.as_str()).collect();
    assert!(sources.contains(&"Direct"));
    assert!(sources.contains(&"Unknown"));
}

#[test]
fn test_top_referrers_capped_at_five() {
    let storage = MemoryStorage::new();
    let log: Vec<VisitorSession> = (0..8)
        .map(|i| visit("s", &format!("https://host{}.example/", i), 0))
        .collect();
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    assert_eq!(snapshot(&storage).top_referrers.len(), 5);
}

// ═══ Weekly series ═══

#[test]
fn test_weekly_series_has_seven_points_ending_today() {
    let storage = MemoryStorage::new();
    let today = Utc::now().date_naive();

    let weekly = snapshot(&storage).weekly_stats;
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[6].label, today.format("%a").to_string());
}

#[test]
fn test_weekly_series_uses_recorded_data() {
    let storage = MemoryStorage::new();
    let today = Utc::now().date_naive();
    let stats = vec![DailyStat {
        date: today.format("%Y-%m-%d").to_string(),
        visitors: 7,
        page_views: 9,
    }];
    store_collection(&storage, keys::DAILY_STATS, &stats).unwrap();

    let weekly = snapshot_at(&storage, today).weekly_stats;
    assert_eq!(weekly[6].visitors, 7);
    assert_eq!(weekly[6].page_views, 9);
}

#[test]
fn test_weekly_series_fills_missing_days_with_plausible_values() {
    let storage = MemoryStorage::new();

    for point in snapshot(&storage).weekly_stats {
        assert!((10..30).contains(&point.visitors));
        assert!((15..45).contains(&point.page_views));
    }
}

// ═══ Monthly series ═══

#[test]
fn test_monthly_series_has_twelve_points_ending_current_month() {
    let storage = MemoryStorage::new();
    let today = Utc::now().date_naive();

    let monthly = snapshot(&storage).monthly_stats;
    assert_eq!(monthly.len(), 12);
    assert_eq!(monthly[11].label, today.format("%b").to_string());
}

#[test]
fn test_monthly_series_sums_days_in_month() {
    let storage = MemoryStorage::new();
    let today = Utc::now().date_naive();
    let prefix = format!("{:04}-{:02}", today.year(), today.month());
    let stats = vec![
        DailyStat {
            date: format!("{}-01", prefix),
            visitors: 4,
            page_views: 10,
        },
        DailyStat {
            date: format!("{}-02", prefix),
            visitors: 6,
            page_views: 20,
        },
    ];
    store_collection(&storage, keys::DAILY_STATS, &stats).unwrap();

    let monthly = snapshot_at(&storage, today).monthly_stats;
    assert_eq!(monthly[11].visitors, 10);
    assert_eq!(monthly[11].page_views, 30);
}

#[test]
fn test_monthly_series_fills_empty_months_with_plausible_values() {
    let storage = MemoryStorage::new();

    for point in snapshot(&storage).monthly_stats {
        assert!((100..300).contains(&point.visitors));
        assert!((150..450).contains(&point.page_views));
    }
}

// ═══ Purity ═══

#[test]
fn test_snapshot_does_not_mutate_storage() {
    let storage = MemoryStorage::new();
    let log = vec![visit("s1", "direct", 0)];
    store_collection(&storage, keys::VISIT_LOG, &log).unwrap();

    let before = storage.read(keys::VISIT_LOG).unwrap();
    snapshot(&storage);
    let after = storage.read(keys::VISIT_LOG).unwrap();
    assert_eq!(before, after);
}

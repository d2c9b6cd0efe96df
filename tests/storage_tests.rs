use portico_core::models::DailyStat;
use portico_core::storage::{
    LocalStorage, MemoryStorage, StorageBackend, keys, load_collection, store_collection,
};

fn temp_data_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("portico-storage-test-{}", uuid::Uuid::new_v4()))
}

// ═══ MemoryStorage ═══

#[test]
fn test_memory_missing_key_is_none() {
    let storage = MemoryStorage::new();
    assert!(storage.read("users").unwrap().is_none());
}

#[test]
fn test_memory_write_read_round_trip() {
    let storage = MemoryStorage::new();
    storage.write("users", "[1,2,3]").unwrap();
    assert_eq!(storage.read("users").unwrap().unwrap(), "[1,2,3]");
}

#[test]
fn test_memory_write_replaces() {
    let storage = MemoryStorage::new();
    storage.write("k", "old").unwrap();
    storage.write("k", "new").unwrap();
    assert_eq!(storage.read("k").unwrap().unwrap(), "new");
}

#[test]
fn test_memory_remove() {
    let storage = MemoryStorage::new();
    storage.write("k", "v").unwrap();
    storage.remove("k").unwrap();
    assert!(storage.read("k").unwrap().is_none());
    // Removing again is fine
    storage.remove("k").unwrap();
}

// ═══ LocalStorage ═══

#[test]
fn test_local_missing_key_is_none() {
    let storage = LocalStorage::new(temp_data_dir());
    assert!(storage.read("users").unwrap().is_none());
}

#[test]
fn test_local_write_read_round_trip() {
    let dir = temp_data_dir();
    let storage = LocalStorage::new(&dir);

    storage.write(keys::USERS, r#"[{"x":1}]"#).unwrap();
    assert_eq!(
        storage.read(keys::USERS).unwrap().unwrap(),
        r#"[{"x":1}]"#
    );
    assert!(dir.join("users.json").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_local_remove_is_idempotent() {
    let dir = temp_data_dir();
    let storage = LocalStorage::new(&dir);

    storage.write("k", "v").unwrap();
    storage.remove("k").unwrap();
    assert!(storage.read("k").unwrap().is_none());
    storage.remove("k").unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_local_survives_reopen() {
    let dir = temp_data_dir();
    LocalStorage::new(&dir).write("k", "persisted").unwrap();

    let reopened = LocalStorage::new(&dir);
    assert_eq!(reopened.read("k").unwrap().unwrap(), "persisted");

    let _ = std::fs::remove_dir_all(&dir);
}

// ═══ Typed collection helpers ═══

#[test]
fn test_collection_round_trip() {
    let storage = MemoryStorage::new();
    let stats = vec![
        DailyStat {
            date: "2026-08-29".to_string(),
            visitors: 3,
            page_views: 9,
        },
        DailyStat {
            date: "2026-08-30".to_string(),
            visitors: 1,
            page_views: 2,
        },
    ];

    store_collection(&storage, keys::DAILY_STATS, &stats).unwrap();
    let loaded: Vec<DailyStat> = load_collection(&storage, keys::DAILY_STATS);
    assert_eq!(loaded, stats);
}

#[test]
fn test_collection_missing_key_is_empty() {
    let storage = MemoryStorage::new();
    let loaded: Vec<DailyStat> = load_collection(&storage, keys::DAILY_STATS);
    assert!(loaded.is_empty());
}

#[test]
fn test_collection_malformed_document_degrades_to_empty() {
    let storage = MemoryStorage::new();
    storage.write(keys::DAILY_STATS, "{not json at all").unwrap();

    let loaded: Vec<DailyStat> = load_collection(&storage, keys::DAILY_STATS);
    assert!(loaded.is_empty());
}

#[test]
fn test_collection_wrong_shape_degrades_to_empty() {
    let storage = MemoryStorage::new();
    storage.write(keys::DAILY_STATS, r#"{"date":"x"}"#).unwrap();

    let loaded: Vec<DailyStat> = load_collection(&storage, keys::DAILY_STATS);
    assert!(loaded.is_empty());
}

#[test]
fn test_local_write_failure_is_reported() {
    // A data dir that collides with an existing file cannot be created.
    let dir = temp_data_dir();
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    std::fs::write(&dir, "occupied").unwrap();

    let storage = LocalStorage::new(&dir);
    let err = storage.write("k", "v").unwrap_err();
    assert_eq!(err.error_code(), "STORAGE_ERROR");

    let _ = std::fs::remove_file(&dir);
}

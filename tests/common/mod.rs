#![allow(dead_code)]

use rusqlite::params;
use tempfile::TempDir;
use travel_desk::{ensure_schema, Store, TourStatus};

/// Fresh store with the schema in place but no sample rows.
pub fn create_test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::new(temp_dir.path().join("test.sqlite"));
    ensure_schema(&store).expect("Failed to create schema");
    (temp_dir, store)
}

pub fn insert_tour(store: &Store, name: &str, price: f64, status: TourStatus, kind: &str) -> i64 {
    let conn = store.open().expect("Failed to open store");
    conn.execute(
        "INSERT INTO tours (name, image, price, tickets, status, type) VALUES (?1, NULL, ?2, 10, ?3, ?4)",
        params![name, price, status, kind],
    )
    .expect("Failed to insert tour");
    conn.last_insert_rowid()
}

pub fn insert_hotel(store: &Store, name: &str, tours_count: i64) -> i64 {
    let conn = store.open().expect("Failed to open store");
    conn.execute(
        "INSERT INTO hotels (name, stars, country, description, tours_count) VALUES (?1, 3, 'Italy', 'Test hotel', ?2)",
        params![name, tours_count],
    )
    .expect("Failed to insert hotel");
    conn.last_insert_rowid()
}

pub fn hotel_count(store: &Store) -> i64 {
    let conn = store.open().expect("Failed to open store");
    conn.query_row("SELECT COUNT(*) FROM hotels", [], |row| row.get(0))
        .expect("Failed to count hotels")
}

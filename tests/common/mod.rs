//! Shared test fixtures for the booking pricing SDK integration tests.
//!
//! `setup_sample_db()` creates an in-memory DuckDB connection populated with
//! small sample tables via NDJSON temp files. The data is laid out around a
//! three-night stay from 2025-06-01 to 2025-06-04 for two guests:
//!
//! * hotel 1 / room 10: tiers 100 (1 guest, 800), 101 (2 guests, 1000/night)
//!   and 102 (3 guests, 1500/night); UB 10 %, GB 20 % with a 50 % penalty.
//! * hotel 1 / room 11: one night not on sale, min stay of 5 nights.
//! * hotel 2 / room 20: a night without price and without free places.
//! * hotel 3 / room 30: 3000/night, UB at full price and NR 15 %.

#![allow(dead_code)]

use booking_pricing::{CacheManager, Connection, StayRequest};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

/// The stay most tests quote.
pub fn sample_stay() -> StayRequest {
    StayRequest::parse("2025-06-01", "2025-06-04", 2).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Create a `Connection` backed by a temporary data directory with sample data
/// loaded into DuckDB tables via NDJSON temp files.
///
/// The caller must keep the `TempDir` alive for the duration of the test.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(Some(tmp_dir.path().to_path_buf()), true, Duration::from_secs(30)).unwrap();
    let conn = Connection::new(cache).unwrap();

    for (table, rows) in sample_tables() {
        write_ndjson_and_register(&conn, table, &rows);
    }

    (conn, tmp_dir)
}

/// Write every sample table as `<table>.ndjson` into `dir`, the layout the
/// SDK expects in its data directory.
pub fn write_sample_exports(dir: &Path) {
    write_exports_except(dir, &[]);
}

/// Like [`write_sample_exports`], leaving out the tables named in `skip`.
pub fn write_exports_except(dir: &Path, skip: &[&str]) {
    for (table, rows) in sample_tables() {
        if skip.contains(&table) {
            continue;
        }
        let mut file = std::fs::File::create(dir.join(format!("{table}.ndjson"))).unwrap();
        for row in rows {
            writeln!(file, "{}", serde_json::to_string(&row).unwrap()).unwrap();
        }
    }
}

pub fn sample_tables() -> Vec<(&'static str, Vec<serde_json::Value>)> {
    vec![
        ("hotels", hotels()),
        ("rooms", rooms()),
        ("settlement_variants", settlement_variants()),
        ("place_prices", place_prices()),
        ("availability", availability()),
        ("room_discount_policies", room_discount_policies()),
        ("room_discounts", room_discounts()),
        ("exchange_rates", exchange_rates()),
    ]
}

fn hotels() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({"id": 1, "name": "Aurora", "city": "moscow", "starcount": 3,
            "best_offer": true, "in_top10": true, "current_amount": 5000}),
        serde_json::json!({"id": 2, "name": "Baltic", "city": "moscow", "starcount": 3,
            "best_offer": false, "in_top10": true, "current_amount": 3000}),
        serde_json::json!({"id": 3, "name": "Neva", "city": "spb", "starcount": 5,
            "best_offer": true, "in_top10": false, "current_amount": 9000}),
        serde_json::json!({"id": 4, "name": "Hostel One", "city": "moscow", "starcount": 6,
            "best_offer": null, "in_top10": null, "current_amount": null}),
    ]
}

fn rooms() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({"id": 10, "hotel_id": 1, "name": "Standard"}),
        serde_json::json!({"id": 11, "hotel_id": 1, "name": "Suite"}),
        serde_json::json!({"id": 20, "hotel_id": 2, "name": "Double"}),
        serde_json::json!({"id": 30, "hotel_id": 3, "name": "Lux"}),
    ]
}

fn settlement_variants() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({"id": 100, "room_id": 10, "settlement": 1}),
        serde_json::json!({"id": 101, "room_id": 10, "settlement": 2}),
        serde_json::json!({"id": 102, "room_id": 10, "settlement": 3}),
        serde_json::json!({"id": 110, "room_id": 11, "settlement": 2}),
        serde_json::json!({"id": 200, "room_id": 20, "settlement": 2}),
        serde_json::json!({"id": 300, "room_id": 30, "settlement": 2}),
    ]
}

fn place_prices() -> Vec<serde_json::Value> {
    let mut rows = Vec::new();
    let mut push = |settlement_id: i64, day: &str, amount: i64| {
        rows.push(serde_json::json!({"settlement_id": settlement_id, "date": day, "amount": amount}));
    };

    for day in ["2025-06-01", "2025-06-02", "2025-06-03"] {
        push(100, day, 800);
        push(101, day, 1000);
        push(102, day, 1500);
        push(300, day, 3000);
    }
    push(101, "2025-06-04", 1200);

    push(110, "2025-06-01", 2000);
    push(110, "2025-06-02", 2000);
    push(110, "2025-06-03", 0);

    push(200, "2025-06-01", 900);
    push(200, "2025-06-02", 900);

    rows
}

fn availability() -> Vec<serde_json::Value> {
    let mut rows = Vec::new();
    let mut push = |room_id: i64, day: &str, placecount: i64, min_days: Option<i64>| {
        rows.push(serde_json::json!({"room_id": room_id, "date": day,
            "placecount": placecount, "min_days": min_days}));
    };

    for day in ["2025-06-01", "2025-06-02", "2025-06-03"] {
        push(10, day, 2, None);
        push(11, day, 1, Some(5));
        push(30, day, 1, Some(1));
    }
    push(20, "2025-06-01", 1, None);
    push(20, "2025-06-02", 0, None);
    push(20, "2025-06-03", 1, None);

    rows
}

fn room_discount_policies() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({"room_id": 10, "ub": true, "ub_discount": 10,
            "gb": true, "gb_discount": 20, "gb_days": 7, "gb_penalty": 50,
            "nr": false, "nr_discount": 0}),
        serde_json::json!({"room_id": 20, "ub": null, "ub_discount": null,
            "gb": null, "gb_discount": null, "gb_days": null, "gb_penalty": null,
            "nr": null, "nr_discount": null}),
        serde_json::json!({"room_id": 30, "ub": true, "ub_discount": 0,
            "gb": false, "gb_discount": 0, "gb_days": 0, "gb_penalty": 0,
            "nr": true, "nr_discount": 15}),
    ]
}

fn room_discounts() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({"discount_id": 1, "room_id": 10, "date": "2025-06-01", "value": 5}),
        serde_json::json!({"discount_id": 1, "room_id": 10, "date": "2025-06-03", "value": 7}),
        serde_json::json!({"discount_id": 2, "room_id": 10, "date": "2025-06-02", "value": 9}),
    ]
}

fn exchange_rates() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({"currency": "USD", "date": "2025-05-30", "nominal": 100,
            "official_rate": 90.0, "rate": 95.0}),
        serde_json::json!({"currency": "USD", "date": "2025-06-02", "nominal": 1,
            "official_rate": 80.0, "rate": null}),
        serde_json::json!({"currency": "EUR", "date": "2025-05-01", "nominal": 1,
            "official_rate": 0.0, "rate": 100.0}),
        serde_json::json!({"currency": "JPY", "date": "2025-05-01", "nominal": 100,
            "official_rate": 60.0, "rate": 61.0}),
        // Rates without an exact binary form.
        serde_json::json!({"currency": "CHF", "date": "2025-05-01", "nominal": 1,
            "official_rate": 1.1, "rate": 2.2}),
    ]
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
fn write_ndjson_and_register(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // DuckDB has copied the rows into an in-memory table by now.
}

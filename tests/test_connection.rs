//! Connection integration tests: raw SQL execution, table registration, etc.

mod common;

use booking_pricing::{CacheManager, Connection, PricingError};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn empty_connection() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let cache =
        CacheManager::new(Some(tmp_dir.path().to_path_buf()), true, Duration::from_secs(30))
            .unwrap();
    (Connection::new(cache).unwrap(), tmp_dir)
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

#[test]
fn execute_returns_correct_rows() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn.execute("SELECT * FROM rooms ORDER BY id", &[]).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["id"], 10);
    assert_eq!(rows[3]["name"], "Lux");
}

#[test]
fn execute_with_params() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn
        .execute("SELECT * FROM rooms WHERE hotel_id = ?", &["1".to_string()])
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn execute_returns_empty_for_no_matches() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn
        .execute("SELECT * FROM rooms WHERE hotel_id = ?", &["999".to_string()])
        .unwrap();
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// execute_scalar
// ---------------------------------------------------------------------------

#[test]
fn execute_scalar_returns_single_value() {
    let (conn, _tmp) = common::setup_sample_db();

    let result = conn.execute_scalar("SELECT COUNT(*) FROM hotels", &[]).unwrap();
    assert_eq!(result.unwrap().as_i64().unwrap(), 4);
}

#[test]
fn execute_scalar_returns_none_for_empty_result() {
    let (conn, _tmp) = common::setup_sample_db();

    let result = conn
        .execute_scalar("SELECT id FROM hotels WHERE id = ?", &["999".to_string()])
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn sum_over_money_column_comes_back_as_integer() {
    let (conn, _tmp) = common::setup_sample_db();

    let total = conn
        .execute_scalar(
            "SELECT SUM(amount) FROM place_prices WHERE settlement_id = ?",
            &["101".to_string()],
        )
        .unwrap()
        .unwrap();
    assert_eq!(total.as_i64(), Some(4200));
}

// ---------------------------------------------------------------------------
// Type conversions
// ---------------------------------------------------------------------------

#[test]
fn dates_are_returned_as_iso_strings() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn
        .execute(
            "SELECT date FROM place_prices WHERE settlement_id = ? ORDER BY date",
            &["200".to_string()],
        )
        .unwrap();
    assert_eq!(rows[0]["date"], "2025-06-01");
    assert_eq!(rows[1]["date"], "2025-06-02");
}

#[test]
fn null_and_boolean_values_are_converted() {
    let (conn, _tmp) = common::setup_sample_db();

    let rows = conn
        .execute("SELECT best_offer, current_amount FROM hotels ORDER BY id", &[])
        .unwrap();
    assert_eq!(rows[0]["best_offer"], true);
    assert_eq!(rows[1]["best_offer"], false);
    assert!(rows[3]["best_offer"].is_null());
    assert!(rows[3]["current_amount"].is_null());
}

#[test]
fn double_values_are_converted() {
    let (conn, _tmp) = common::setup_sample_db();

    let value = conn
        .execute_scalar(
            "SELECT official_rate FROM exchange_rates WHERE currency = 'JPY'",
            &[],
        )
        .unwrap()
        .unwrap();
    assert!((value.as_f64().unwrap() - 60.0).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// execute_into
// ---------------------------------------------------------------------------

#[test]
fn execute_into_deserializes_rows() {
    let (conn, _tmp) = common::setup_sample_db();

    let rates: Vec<booking_pricing::ExchangeRate> = conn
        .execute_into(
            "SELECT * FROM exchange_rates WHERE currency = 'USD' ORDER BY date",
            &[],
        )
        .unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].date, common::date("2025-05-30"));
    assert_eq!(rates[0].nominal, 100);
    assert_eq!(rates[1].rate, None);
}

// ---------------------------------------------------------------------------
// register_table_from_ndjson
// ---------------------------------------------------------------------------

#[test]
fn unknown_tables_are_auto_detected() {
    let (conn, _tmp) = empty_connection();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"id": 1, "name": "Alpha"}}"#).unwrap();
    writeln!(file, r#"{{"id": 2, "name": "Beta"}}"#).unwrap();
    file.flush().unwrap();

    conn.register_table_from_ndjson("scratch", file.path().to_str().unwrap())
        .unwrap();

    let rows = conn.execute("SELECT * FROM scratch ORDER BY id", &[]).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["name"], "Beta");
    assert!(conn.has_view("scratch"));
}

#[test]
fn known_tables_use_fixed_schema() {
    let (conn, _tmp) = empty_connection();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"settlement_id": 7, "date": "2025-01-02", "amount": 1500}}"#).unwrap();
    file.flush().unwrap();

    conn.register_table_from_ndjson("place_prices", file.path().to_str().unwrap())
        .unwrap();

    let rows = conn
        .execute("SELECT typeof(date) AS d, typeof(amount) AS a FROM place_prices", &[])
        .unwrap();
    assert_eq!(rows[0]["d"], "DATE");
    assert_eq!(rows[0]["a"], "BIGINT");
}

#[test]
fn register_table_replaces_existing_table() {
    let (conn, _tmp) = empty_connection();

    let mut file1 = NamedTempFile::new().unwrap();
    writeln!(file1, r#"{{"id": 1, "hotel_id": 1, "name": "old"}}"#).unwrap();
    file1.flush().unwrap();
    conn.register_table_from_ndjson("rooms", file1.path().to_str().unwrap())
        .unwrap();

    let mut file2 = NamedTempFile::new().unwrap();
    writeln!(file2, r#"{{"id": 1, "hotel_id": 1, "name": "new"}}"#).unwrap();
    file2.flush().unwrap();
    conn.register_table_from_ndjson("rooms", file2.path().to_str().unwrap())
        .unwrap();

    let rows = conn.execute("SELECT * FROM rooms", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "new");
}

// ---------------------------------------------------------------------------
// Lazy loading / views
// ---------------------------------------------------------------------------

#[test]
fn views_returns_all_registered_tables_sorted() {
    let (conn, _tmp) = common::setup_sample_db();

    assert_eq!(
        conn.views(),
        vec![
            "availability",
            "exchange_rates",
            "hotels",
            "place_prices",
            "room_discount_policies",
            "room_discounts",
            "rooms",
            "settlement_variants",
        ]
    );
}

#[test]
fn reset_views_clears_registered_views() {
    let (conn, _tmp) = common::setup_sample_db();

    conn.reset_views();

    assert!(conn.views().is_empty());
    assert!(!conn.has_view("hotels"));
}

#[test]
fn ensure_views_loads_exports_from_data_dir() {
    let (conn, tmp) = empty_connection();
    common::write_sample_exports(tmp.path());

    conn.ensure_views(&["hotels", "rooms"]).unwrap();

    assert_eq!(conn.views(), vec!["hotels", "rooms"]);
    let count = conn.execute_scalar("SELECT COUNT(*) FROM rooms", &[]).unwrap();
    assert_eq!(count.unwrap().as_i64(), Some(4));
}

#[test]
fn ensure_views_offline_without_export_is_not_found() {
    let (conn, _tmp) = empty_connection();

    let err = conn.ensure_views(&["hotels"]).unwrap_err();
    assert!(matches!(err, PricingError::NotFound(_)), "{err}");
}

#[test]
fn ensure_views_rejects_unknown_table() {
    let (conn, _tmp) = empty_connection();

    let err = conn.ensure_views(&["bookings"]).unwrap_err();
    assert!(matches!(err, PricingError::NotFound(_)));
}

#[test]
fn raw_provides_access_to_underlying_duckdb_connection() {
    let (conn, _tmp) = common::setup_sample_db();

    conn.raw()
        .execute_batch("CREATE TABLE raw_test (id INTEGER, value TEXT); INSERT INTO raw_test VALUES (1, 'hello')")
        .unwrap();

    let rows = conn.execute("SELECT * FROM raw_test", &[]).unwrap();
    assert_eq!(rows[0]["value"], "hello");
}

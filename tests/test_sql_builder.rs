//! Unit tests for the SqlBuilder query construction.

use booking_pricing::SqlBuilder;
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("hotels").build();
    assert_eq!(sql, "SELECT *\nFROM hotels");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("hotels")
        .select(&["id", "name"])
        .build();
    assert!(sql.starts_with("SELECT id, name\n"));
}

#[test]
fn distinct_adds_keyword() {
    let (sql, _) = SqlBuilder::new("rooms").distinct().build();
    assert!(sql.starts_with("SELECT DISTINCT *"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_eq_stringifies_numbers() {
    let (sql, params) = SqlBuilder::new("rooms")
        .where_eq("hotel_id", 42)
        .build();
    assert!(sql.contains("WHERE hotel_id = ?"));
    assert_eq!(params, vec!["42"]);
}

#[test]
fn comparisons_use_placeholders() {
    let (sql, params) = SqlBuilder::new("place_prices")
        .where_gt("amount", 0)
        .where_gte("settlement", 2u32)
        .where_lte("amount", 5000i64)
        .build();
    assert!(sql.contains("amount > ? AND settlement >= ? AND amount <= ?"));
    assert_eq!(params, vec!["0", "2", "5000"]);
}

#[test]
fn where_in_adds_in_clause() {
    let (sql, params) = SqlBuilder::new("rooms")
        .where_in("id", &[10i64, 11, 20])
        .build();
    assert!(sql.contains("id IN (?, ?, ?)"));
    assert_eq!(params, vec!["10", "11", "20"]);
}

#[test]
fn where_in_empty_produces_false() {
    let empty: &[i64] = &[];
    let (sql, params) = SqlBuilder::new("rooms").where_in("id", empty).build();
    assert!(sql.contains("WHERE FALSE"));
    assert!(params.is_empty());
}

#[test]
fn date_conditions_cast_iso_strings() {
    let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
    let (sql, params) = SqlBuilder::new("place_prices")
        .where_date_between("date", from, to)
        .where_date_lte("date", to)
        .where_date_eq("date", from)
        .build();
    assert!(sql.contains("date BETWEEN CAST(? AS DATE) AND CAST(? AS DATE)"));
    assert!(sql.contains("date <= CAST(? AS DATE)"));
    assert!(sql.contains("date = CAST(? AS DATE)"));
    assert_eq!(params, vec!["2025-06-01", "2025-06-03", "2025-06-03", "2025-06-01"]);
}

#[test]
fn where_clause_appends_params_in_order() {
    let (sql, params) = SqlBuilder::new("availability")
        .where_eq("room_id", 10)
        .where_clause("COALESCE(min_days, 0) <= ?", &[3])
        .build();
    assert!(sql.contains("room_id = ?"));
    assert!(sql.contains("COALESCE(min_days, 0) <= ?"));
    assert_eq!(params, vec!["10", "3"]);
}

#[test]
fn where_clause_without_params() {
    let (sql, params) = SqlBuilder::new("hotels")
        .where_clause::<&str>("best_offer", &[])
        .build();
    assert!(sql.contains("WHERE best_offer"));
    assert!(params.is_empty());
}

#[test]
fn multiple_where_clauses_joined_with_and() {
    let (sql, _) = SqlBuilder::new("hotels")
        .where_eq("city", "moscow")
        .where_eq("starcount", 3)
        .build();
    assert!(sql.contains("WHERE city = ? AND starcount = ?"));
}

// ---------------------------------------------------------------------------
// JOIN / GROUP BY / HAVING
// ---------------------------------------------------------------------------

#[test]
fn join_adds_clause() {
    let (sql, _) = SqlBuilder::new("settlement_variants sv")
        .join("JOIN place_prices pp ON pp.settlement_id = sv.id")
        .build();
    assert!(sql.contains("FROM settlement_variants sv\nJOIN place_prices pp ON pp.settlement_id = sv.id"));
}

#[test]
fn having_adds_clause_with_params() {
    let (sql, params) = SqlBuilder::new("place_prices")
        .select(&["settlement_id", "COUNT(*) AS nights"])
        .group_by(&["settlement_id"])
        .having("COUNT(*) >= ?", &[3])
        .build();
    assert!(sql.contains("GROUP BY settlement_id"));
    assert!(sql.contains("HAVING COUNT(*) >= ?"));
    assert_eq!(params, vec!["3"]);
}

#[test]
fn where_params_precede_having_params_regardless_of_call_order() {
    let (_, params) = SqlBuilder::new("settlement_variants sv")
        .join("JOIN place_prices pp ON pp.settlement_id = sv.id")
        .having("COUNT(DISTINCT pp.date) >= ?", &[3])
        .where_eq("sv.room_id", 10)
        .group_by(&["sv.id"])
        .where_gt("pp.amount", 0)
        .build();
    assert_eq!(params, vec!["10", "0", "3"]);
}

// ---------------------------------------------------------------------------
// ORDER BY / LIMIT / OFFSET
// ---------------------------------------------------------------------------

#[test]
fn order_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("settlement_variants")
        .order_by(&["settlement ASC", "id ASC"])
        .build();
    assert!(sql.contains("ORDER BY settlement ASC, id ASC"));
}

#[test]
fn limit_and_offset_together() {
    let (sql, _) = SqlBuilder::new("hotels").limit(10).offset(20).build();
    assert!(sql.ends_with("LIMIT 10\nOFFSET 20"));
}

// ---------------------------------------------------------------------------
// Combined
// ---------------------------------------------------------------------------

#[test]
fn full_tier_query_renders_clauses_in_sql_order() {
    let (sql, params) = SqlBuilder::new("settlement_variants sv")
        .select(&["sv.id", "sv.settlement"])
        .join("JOIN place_prices pp ON pp.settlement_id = sv.id")
        .where_eq("sv.room_id", 10)
        .where_gte("sv.settlement", 2)
        .group_by(&["sv.id", "sv.settlement"])
        .having("COUNT(DISTINCT pp.date) >= ?", &[3])
        .order_by(&["sv.settlement ASC"])
        .limit(1)
        .build();

    let order = ["SELECT", "FROM", "JOIN", "WHERE", "GROUP BY", "HAVING", "ORDER BY", "LIMIT"];
    let positions: Vec<usize> = order.iter().map(|kw| sql.find(kw).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{sql}");
    assert_eq!(params, vec!["10", "2", "3"]);
}

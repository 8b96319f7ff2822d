//! Discount policy configuration and per-date discount values.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::DiscountPolicy;
use crate::pricing::layout::values_by_dates;
use crate::queries::tiers::iso_dates;
use crate::sql_builder::SqlBuilder;

/// Query interface over `room_discount_policies` and `room_discounts`.
pub struct DiscountQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> DiscountQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// The UB/GB/NR configuration of a room, if it has one.
    ///
    /// Null flags read as disabled and null percentages as zero.
    pub fn policy_for_room(&self, room_id: i64) -> Result<Option<DiscountPolicy>> {
        self.conn.ensure_views(&["room_discount_policies"])?;

        let (sql, params) = SqlBuilder::new("room_discount_policies")
            .select(&[
                "room_id",
                "COALESCE(ub, FALSE) AS ub",
                "COALESCE(ub_discount, 0) AS ub_discount",
                "COALESCE(gb, FALSE) AS gb",
                "COALESCE(gb_discount, 0) AS gb_discount",
                "COALESCE(gb_days, 0) AS gb_days",
                "COALESCE(gb_penalty, 0) AS gb_penalty",
                "COALESCE(nr, FALSE) AS nr",
                "COALESCE(nr_discount, 0) AS nr_discount",
            ])
            .where_eq("room_id", room_id)
            .limit(1)
            .build();

        let mut rows: Vec<DiscountPolicy> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.pop())
    }

    /// Values of one discount for a room aligned onto `dates`.
    pub fn values_on_dates(
        &self,
        discount_id: i64,
        room_id: i64,
        dates: &[NaiveDate],
    ) -> Result<Vec<Option<i64>>> {
        self.conn.ensure_views(&["room_discounts"])?;

        let (sql, params) = SqlBuilder::new("room_discounts")
            .select(&["date", "value"])
            .where_eq("discount_id", discount_id)
            .where_eq("room_id", room_id)
            .where_in("CAST(date AS VARCHAR)", &iso_dates(dates))
            .order_by(&["date ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        let pairs = date_value_pairs(&rows, "value");
        Ok(values_by_dates(dates, &pairs))
    }
}

/// Extract `(date, <column>)` pairs from raw rows, skipping nulls.
pub(crate) fn date_value_pairs(
    rows: &[std::collections::HashMap<String, serde_json::Value>],
    column: &str,
) -> Vec<(NaiveDate, i64)> {
    rows.iter()
        .filter_map(|row| {
            let date = row
                .get("date")
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse::<NaiveDate>().ok())?;
            let value = row.get(column).and_then(|v| v.as_i64())?;
            Some((date, value))
        })
        .collect()
}

//! Exchange rate lookups against the `exchange_rates` table.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::ExchangeRate;
use crate::sql_builder::SqlBuilder;

// Rates leave DuckDB as fixed-point text so they deserialize into exact decimals.
const RATE_COLUMNS: [&str; 5] = [
    "currency",
    "date",
    "nominal",
    "CAST(CAST(official_rate AS DECIMAL(18, 6)) AS VARCHAR) AS official_rate",
    "CAST(CAST(rate AS DECIMAL(18, 6)) AS VARCHAR) AS rate",
];

/// Query interface for currency exchange rates.
pub struct RateQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> RateQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// The authoritative rate for `currency` as of `on`: the row with the
    /// latest date not after `on`. Currency codes are matched case-insensitively.
    pub fn latest(&self, currency: &str, on: NaiveDate) -> Result<Option<ExchangeRate>> {
        self.conn.ensure_views(&["exchange_rates"])?;

        let (sql, params) = SqlBuilder::new("exchange_rates")
            .select(&RATE_COLUMNS)
            .where_eq("UPPER(currency)", currency.trim().to_uppercase())
            .where_date_lte("date", on)
            .order_by(&["date DESC"])
            .limit(1)
            .build();

        let mut rows: Vec<ExchangeRate> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.pop())
    }

    /// All recorded rates for `currency`, newest first.
    pub fn history(&self, currency: &str) -> Result<Vec<ExchangeRate>> {
        self.conn.ensure_views(&["exchange_rates"])?;

        let (sql, params) = SqlBuilder::new("exchange_rates")
            .select(&RATE_COLUMNS)
            .where_eq("UPPER(currency)", currency.trim().to_uppercase())
            .order_by(&["date DESC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }
}

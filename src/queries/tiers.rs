//! Price tier (settlement variant) queries: resolution and night summation.

use chrono::NaiveDate;

use crate::error::{PricingError, Result};
use crate::models::{PlacePrice, SettlementVariant, StayRequest};
use crate::pricing::layout::values_by_dates;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// TierQuery
// ---------------------------------------------------------------------------

/// Query interface over `settlement_variants` and `place_prices`.
pub struct TierQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> TierQuery<'a> {
    /// Create a new `TierQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Tiers of `room_id` that can sell the whole stay, tightest fit first.
    ///
    /// A tier qualifies when its capacity is at least the guest count and it
    /// has a positive price for every night in `[from, to)`. Ordering is
    /// capacity ascending, then tier id ascending.
    pub fn candidates(&self, room_id: i64, stay: &StayRequest) -> Result<Vec<SettlementVariant>> {
        self.conn
            .ensure_views(&["settlement_variants", "place_prices"])?;

        let (sql, params) = SqlBuilder::new("settlement_variants sv")
            .select(&["sv.id", "sv.room_id", "sv.settlement"])
            .join("JOIN place_prices pp ON pp.settlement_id = sv.id")
            .where_eq("sv.room_id", room_id)
            .where_gte("sv.settlement", stay.guests())
            .where_date_between("pp.date", stay.from_date(), stay.last_night())
            .where_gt("pp.amount", 0)
            .group_by(&["sv.id", "sv.room_id", "sv.settlement"])
            .having("COUNT(DISTINCT pp.date) >= ?", &[stay.nights()])
            .order_by(&["sv.settlement ASC", "sv.id ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// The tier a stay is priced with.
    ///
    /// Fails with [`PricingError::NoPriceAvailable`] when no tier covers every
    /// night for the requested guests.
    pub fn resolve(&self, room_id: i64, stay: &StayRequest) -> Result<SettlementVariant> {
        self.candidates(room_id, stay)?
            .into_iter()
            .next()
            .ok_or_else(|| PricingError::NoPriceAvailable {
                subject: format!("room {}", room_id),
                from: stay.from_date(),
                to: stay.to_date(),
                guests: stay.guests(),
            })
    }

    /// Sum of nightly prices of a tier over `[from, to)`.
    pub fn stay_total(&self, settlement_id: i64, stay: &StayRequest) -> Result<i64> {
        self.conn.ensure_views(&["place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices")
            .select(&["COALESCE(SUM(amount), 0) AS total"])
            .where_eq("settlement_id", settlement_id)
            .where_date_between("date", stay.from_date(), stay.last_night())
            .build();

        let total = self.conn.execute_scalar(&sql, &params)?;
        Ok(total.and_then(|v| v.as_i64()).unwrap_or(0))
    }

    /// Price of a single night for a tier, if one is recorded.
    pub fn night_price(&self, settlement_id: i64, date: NaiveDate) -> Result<Option<i64>> {
        self.conn.ensure_views(&["place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices")
            .select(&["amount"])
            .where_eq("settlement_id", settlement_id)
            .where_date_eq("date", date)
            .limit(1)
            .build();

        let value = self.conn.execute_scalar(&sql, &params)?;
        Ok(value.and_then(|v| v.as_i64()))
    }

    /// Every recorded night of a tier within the stay, by date.
    pub fn night_prices(&self, settlement_id: i64, stay: &StayRequest) -> Result<Vec<PlacePrice>> {
        self.conn.ensure_views(&["place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices")
            .select(&["settlement_id", "date", "amount"])
            .where_eq("settlement_id", settlement_id)
            .where_date_between("date", stay.from_date(), stay.last_night())
            .order_by(&["date ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// The tightest tier of a room that is on sale on `date` for `guests`.
    pub fn for_guests_on_date(
        &self,
        room_id: i64,
        date: NaiveDate,
        guests: u32,
    ) -> Result<Option<SettlementVariant>> {
        self.conn
            .ensure_views(&["settlement_variants", "place_prices"])?;

        let (sql, params) = SqlBuilder::new("settlement_variants sv")
            .select(&["sv.id", "sv.room_id", "sv.settlement"])
            .join("JOIN place_prices pp ON pp.settlement_id = sv.id")
            .where_eq("sv.room_id", room_id)
            .where_gte("sv.settlement", guests)
            .where_date_eq("pp.date", date)
            .where_gt("pp.amount", 0)
            .order_by(&["sv.settlement ASC", "sv.id ASC"])
            .limit(1)
            .build();

        let mut rows: Vec<SettlementVariant> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.pop())
    }

    /// Cheapest positive nightly price of any tier of the room on `date`.
    pub fn room_min_price_on_date(&self, room_id: i64, date: NaiveDate) -> Result<Option<i64>> {
        self.conn
            .ensure_views(&["settlement_variants", "place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices pp")
            .select(&["MIN(pp.amount) AS amount"])
            .join("JOIN settlement_variants sv ON sv.id = pp.settlement_id")
            .where_eq("sv.room_id", room_id)
            .where_date_eq("pp.date", date)
            .where_gt("pp.amount", 0)
            .build();

        let value = self.conn.execute_scalar(&sql, &params)?;
        Ok(value.and_then(|v| v.as_i64()))
    }

    /// Cheapest positive nightly price of any room of the hotel on `date`.
    pub fn hotel_min_price_on_date(&self, hotel_id: i64, date: NaiveDate) -> Result<Option<i64>> {
        self.conn
            .ensure_views(&["rooms", "settlement_variants", "place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices pp")
            .select(&["MIN(pp.amount) AS amount"])
            .join("JOIN settlement_variants sv ON sv.id = pp.settlement_id")
            .join("JOIN rooms r ON r.id = sv.room_id")
            .where_eq("r.hotel_id", hotel_id)
            .where_date_eq("pp.date", date)
            .where_gt("pp.amount", 0)
            .build();

        let value = self.conn.execute_scalar(&sql, &params)?;
        Ok(value.and_then(|v| v.as_i64()))
    }

    /// Prices of a tier aligned onto `dates` (sorted, deduplicated), with
    /// `None` for nights that have no recorded price.
    pub fn prices_on_dates(&self, settlement_id: i64, dates: &[NaiveDate]) -> Result<Vec<Option<i64>>> {
        self.conn.ensure_views(&["place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices")
            .select(&["settlement_id", "date", "amount"])
            .where_eq("settlement_id", settlement_id)
            .where_in("CAST(date AS VARCHAR)", &iso_dates(dates))
            .order_by(&["date ASC"])
            .build();

        let rows: Vec<PlacePrice> = self.conn.execute_into(&sql, &params)?;
        let pairs: Vec<(NaiveDate, i64)> = rows.into_iter().map(|p| (p.date, p.amount)).collect();
        Ok(values_by_dates(dates, &pairs))
    }
}

pub(crate) fn iso_dates(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
}

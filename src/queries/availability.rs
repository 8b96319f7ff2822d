//! Room availability queries against the `availability` table.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Availability, StayRequest};
use crate::pricing::layout::values_by_dates;
use crate::queries::discounts::date_value_pairs;
use crate::queries::tiers::iso_dates;
use crate::sql_builder::SqlBuilder;

pub struct AvailabilityQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> AvailabilityQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Rooms of a hotel that can be booked for the whole stay.
    ///
    /// Every night needs a free place (`placecount > 0`) and a minimum-stay
    /// requirement no longer than the stay itself. Ordered by room id.
    pub fn rooms_for_stay(&self, hotel_id: i64, stay: &StayRequest) -> Result<Vec<i64>> {
        self.conn.ensure_views(&["rooms", "availability"])?;

        let (sql, params) = SqlBuilder::new("rooms r")
            .select(&["r.id"])
            .join("JOIN availability a ON a.room_id = r.id")
            .where_eq("r.hotel_id", hotel_id)
            .where_date_between("a.date", stay.from_date(), stay.last_night())
            .where_gt("a.placecount", 0)
            .where_clause("COALESCE(a.min_days, 0) <= ?", &[stay.nights()])
            .group_by(&["r.id"])
            .having("COUNT(DISTINCT a.date) >= ?", &[stay.nights()])
            .order_by(&["r.id ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .iter()
            .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
            .collect())
    }

    /// Recorded availability of a room for each night of the stay.
    pub fn for_room(&self, room_id: i64, stay: &StayRequest) -> Result<Vec<Availability>> {
        self.conn.ensure_views(&["availability"])?;

        let (sql, params) = SqlBuilder::new("availability")
            .select(&["room_id", "date", "placecount", "min_days"])
            .where_eq("room_id", room_id)
            .where_date_between("date", stay.from_date(), stay.last_night())
            .order_by(&["date ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Free places of a room aligned onto `dates`.
    pub fn placecount_on_dates(&self, room_id: i64, dates: &[NaiveDate]) -> Result<Vec<Option<i64>>> {
        self.column_on_dates(room_id, dates, "placecount")
    }

    /// Minimum-stay requirement of a room aligned onto `dates`.
    pub fn min_days_on_dates(&self, room_id: i64, dates: &[NaiveDate]) -> Result<Vec<Option<i64>>> {
        self.column_on_dates(room_id, dates, "min_days")
    }

    fn column_on_dates(
        &self,
        room_id: i64,
        dates: &[NaiveDate],
        column: &str,
    ) -> Result<Vec<Option<i64>>> {
        self.conn.ensure_views(&["availability"])?;

        let (sql, params) = SqlBuilder::new("availability")
            .select(&["date", column])
            .where_eq("room_id", room_id)
            .where_in("CAST(date AS VARCHAR)", &iso_dates(dates))
            .order_by(&["date ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        Ok(values_by_dates(dates, &date_value_pairs(&rows, column)))
    }
}

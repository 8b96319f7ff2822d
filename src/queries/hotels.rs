//! Hotel listing queries used by the search and landing pages.

use crate::error::Result;
use crate::models::{Hotel, Room, StarCategory, StarCount};
use crate::pricing::layout::intro_columns;
use crate::sql_builder::SqlBuilder;

const HOTEL_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "city",
    "starcount",
    "best_offer",
    "in_top10",
    "current_amount",
];

/// Query interface for hotels backed by the `hotels` table.
pub struct HotelQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> HotelQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// A single hotel by id.
    pub fn get(&self, hotel_id: i64) -> Result<Option<Hotel>> {
        self.conn.ensure_views(&["hotels"])?;

        let (sql, params) = SqlBuilder::new("hotels")
            .select(&HOTEL_COLUMNS)
            .where_eq("id", hotel_id)
            .limit(1)
            .build();

        let mut rows: Vec<Hotel> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.pop())
    }

    /// Rooms of a hotel, ordered by id.
    pub fn rooms(&self, hotel_id: i64) -> Result<Vec<Room>> {
        self.conn.ensure_views(&["rooms"])?;

        let (sql, params) = SqlBuilder::new("rooms")
            .select(&["id", "hotel_id", "name"])
            .where_eq("hotel_id", hotel_id)
            .order_by(&["id ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Hotels of one category, ordered by name.
    pub fn by_category(&self, category: StarCategory) -> Result<Vec<Hotel>> {
        self.conn.ensure_views(&["hotels"])?;

        let (sql, params) = SqlBuilder::new("hotels")
            .select(&HOTEL_COLUMNS)
            .where_eq("starcount", category.code())
            .order_by(&["name ASC", "id ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Hotels of one category split into the five intro columns.
    pub fn intro_grid(&self, category: StarCategory) -> Result<Vec<Vec<Hotel>>> {
        let hotels = self.by_category(category)?;
        Ok(intro_columns(&hotels)
            .into_iter()
            .map(|column| column.to_vec())
            .collect())
    }

    /// Total number of hotels.
    pub fn count(&self) -> Result<i64> {
        self.conn.ensure_views(&["hotels"])?;
        let value = self.conn.execute_scalar("SELECT COUNT(*) FROM hotels", &[])?;
        Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
    }

    /// Number of hotels in the city with the given slug.
    pub fn count_in_city(&self, city_slug: &str) -> Result<i64> {
        self.conn.ensure_views(&["hotels"])?;

        let (sql, params) = SqlBuilder::new("hotels")
            .select(&["COUNT(*) AS cnt"])
            .where_eq("city", city_slug)
            .build();

        let value = self.conn.execute_scalar(&sql, &params)?;
        Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
    }

    /// Hotels flagged as best offers, most expensive first.
    pub fn best_offers(&self) -> Result<Vec<Hotel>> {
        self.conn.ensure_views(&["hotels"])?;

        let (sql, params) = SqlBuilder::new("hotels")
            .select(&HOTEL_COLUMNS)
            .where_clause::<&str>("best_offer", &[])
            .order_by(&["current_amount DESC NULLS LAST", "id ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Top-10 flagged hotels of a city, most expensive first.
    pub fn top10(&self, city_slug: &str) -> Result<Vec<Hotel>> {
        self.conn.ensure_views(&["hotels"])?;

        let (sql, params) = SqlBuilder::new("hotels")
            .select(&HOTEL_COLUMNS)
            .where_clause::<&str>("in_top10", &[])
            .where_eq("city", city_slug)
            .order_by(&["current_amount DESC NULLS LAST", "id ASC"])
            .limit(10)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Hotel count per star category, ascending by category.
    ///
    /// `restrict_to` limits the count to a set of hotel ids (e.g. the hits of
    /// the current search).
    pub fn star_counts(&self, restrict_to: Option<&[i64]>) -> Result<Vec<StarCount>> {
        self.conn.ensure_views(&["hotels"])?;

        let mut qb = SqlBuilder::new("hotels");
        qb.select(&["starcount", "COUNT(*) AS count"])
            .where_clause::<&str>("starcount IS NOT NULL", &[])
            .group_by(&["starcount"])
            .order_by(&["starcount ASC"]);

        if let Some(ids) = restrict_to {
            qb.where_in("id", ids);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }
}

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PricingError, Result};

// ---------------------------------------------------------------------------
// StayRequest — dates and guest count of a prospective booking
// ---------------------------------------------------------------------------

/// A stay over the half-open night range `[from_date, to_date)`.
///
/// Construction validates that the departure is after the arrival and that at
/// least one guest is staying, so `nights()` is always positive. Deserialized
/// stays go through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayRequest {
    from_date: NaiveDate,
    to_date: NaiveDate,
    guests: u32,
}

impl StayRequest {
    pub fn new(from_date: NaiveDate, to_date: NaiveDate, guests: u32) -> Result<Self> {
        if to_date <= from_date {
            return Err(PricingError::InvalidArgument(format!(
                "departure {} must be after arrival {}",
                to_date, from_date
            )));
        }
        if guests == 0 {
            return Err(PricingError::InvalidArgument(
                "a stay needs at least one guest".to_string(),
            ));
        }
        Ok(Self {
            from_date,
            to_date,
            guests,
        })
    }

    /// Parse `YYYY-MM-DD` dates, as they arrive from search forms.
    pub fn parse(from_date: &str, to_date: &str, guests: u32) -> Result<Self> {
        Self::new(parse_date(from_date)?, parse_date(to_date)?, guests)
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.to_date - self.from_date).num_days()
    }

    /// The last night that is charged (the day before departure).
    pub fn last_night(&self) -> NaiveDate {
        self.to_date - Days::new(1)
    }

    /// Every charged night in order.
    pub fn nights_iter(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to_date;
        self.from_date.iter_days().take_while(move |d| *d < to)
    }
}

impl<'de> Deserialize<'de> for StayRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            from_date: NaiveDate,
            to_date: NaiveDate,
            guests: u32,
        }

        let f = Fields::deserialize(deserializer)?;
        Self::new(f.from_date, f.to_date, f.guests).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| PricingError::InvalidArgument(format!("bad date '{}': {}", value, e)))
}

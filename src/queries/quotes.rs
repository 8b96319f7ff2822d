//! The booking price calculator.
//!
//! Resolves the price tier for a stay, sums its nights, converts the total
//! into the client currency and expands it into the UB/GB/NR variants.
//! A stay that no tier covers is reported as
//! [`PricingError::NoPriceAvailable`]; a missing or broken exchange rate is
//! never an error and simply leaves amounts unconverted.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::models::{DiscountPolicy, ExchangeRate, PolicyKind, PriceQuote, StayRequest};
use crate::pricing::convert::convert_or_unconverted;
use crate::pricing::policy::{evaluate, PolicyInputs};
use crate::queries::{AvailabilityQuery, DiscountQuery, RateQuery, TierQuery};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// QuoteQuery
// ---------------------------------------------------------------------------

pub struct QuoteQuery<'a> {
    conn: &'a crate::connection::Connection,
    config: &'a PricingConfig,
}

impl<'a> QuoteQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection, config: &'a PricingConfig) -> Self {
        Self { conn, config }
    }

    fn convert(&self, amount: Decimal, rate: Option<&ExchangeRate>) -> i64 {
        convert_or_unconverted(amount, rate, self.config.rate_source)
    }

    /// Total for the stay in the client currency.
    pub fn room_full_amount(
        &self,
        room_id: i64,
        stay: &StayRequest,
        rate: Option<&ExchangeRate>,
    ) -> Result<i64> {
        let tiers = TierQuery::new(self.conn);
        let tier = tiers.resolve(room_id, stay)?;
        let total = tiers.stay_total(tier.id, stay)?;
        Ok(self.convert(Decimal::from(total), rate))
    }

    /// Average nightly price for the stay in the client currency.
    pub fn room_average(
        &self,
        room_id: i64,
        stay: &StayRequest,
        rate: Option<&ExchangeRate>,
    ) -> Result<i64> {
        let tiers = TierQuery::new(self.conn);
        let tier = tiers.resolve(room_id, stay)?;
        let total = tiers.stay_total(tier.id, stay)?;
        Ok(self.convert(
            Decimal::from(total) / Decimal::from(stay.nights()),
            rate,
        ))
    }

    /// Full quote for a room: every enabled policy with its price, the
    /// selected one first.
    pub fn price_variants(
        &self,
        room_id: i64,
        stay: &StayRequest,
        rate: Option<&ExchangeRate>,
        selected: Option<PolicyKind>,
    ) -> Result<PriceQuote> {
        let tiers = TierQuery::new(self.conn);
        let tier = tiers.resolve(room_id, stay)?;
        let base_total = self.convert(Decimal::from(tiers.stay_total(tier.id, stay)?), rate);

        let policy = DiscountQuery::new(self.conn)
            .policy_for_room(room_id)?
            .unwrap_or_else(|| DiscountPolicy::disabled(room_id));

        let first_night = if policy.has_gb_penalty() {
            let amount = tiers
                .night_price(tier.id, stay.from_date())?
                .ok_or_else(|| no_price(format!("room {}", room_id), stay))?;
            Some(self.convert(Decimal::from(amount), rate))
        } else {
            None
        };

        let inputs = PolicyInputs::new(stay, base_total, first_night);
        Ok(evaluate(&policy, &inputs, selected))
    }

    /// Cheapest arrival-night price among the hotel's rooms that are
    /// available for the whole stay, counting only tiers that fit the guests.
    pub fn min_search_hotel_price(
        &self,
        hotel_id: i64,
        stay: &StayRequest,
        rate: Option<&ExchangeRate>,
    ) -> Result<i64> {
        let rooms = AvailabilityQuery::new(self.conn).rooms_for_stay(hotel_id, stay)?;
        self.conn
            .ensure_views(&["settlement_variants", "place_prices"])?;

        let (sql, params) = SqlBuilder::new("place_prices pp")
            .select(&["MIN(pp.amount) AS amount"])
            .join("JOIN settlement_variants sv ON sv.id = pp.settlement_id")
            .where_in("sv.room_id", &rooms)
            .where_gte("sv.settlement", stay.guests())
            .where_date_eq("pp.date", stay.from_date())
            .where_gt("pp.amount", 0)
            .build();

        let amount = self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_i64())
            .ok_or_else(|| no_price(format!("hotel {}", hotel_id), stay))?;
        Ok(self.convert(Decimal::from(amount), rate))
    }

    /// Cheapest variant price over all rooms of the hotel available for the
    /// stay. Rooms that cannot be quoted, or offer no policy, are skipped.
    pub fn search_minimal_hotel_cost(
        &self,
        hotel_id: i64,
        stay: &StayRequest,
        rate: Option<&ExchangeRate>,
    ) -> Result<Decimal> {
        let rooms = AvailabilityQuery::new(self.conn).rooms_for_stay(hotel_id, stay)?;

        let mut best: Option<Decimal> = None;
        for room_id in rooms {
            let quote = match self.price_variants(room_id, stay, rate, None) {
                Ok(quote) => quote,
                Err(PricingError::NoPriceAvailable { .. }) => {
                    debug!(hotel_id, room_id, "room has no price for the stay, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if let Some(cheapest) = quote.cheapest() {
                best = Some(best.map_or(cheapest, |b| b.min(cheapest)));
            }
        }

        best.ok_or_else(|| no_price(format!("hotel {}", hotel_id), stay))
    }

    /// Cheapest price of a room on one night in the given currency.
    pub fn room_price_on_date(
        &self,
        room_id: i64,
        date: NaiveDate,
        currency: Option<&str>,
    ) -> Result<Option<i64>> {
        let amount = TierQuery::new(self.conn).room_min_price_on_date(room_id, date)?;
        Ok(amount.map(|a| self.amount_in_currency(Decimal::from(a), currency)))
    }

    /// Cheapest price of any room of a hotel on one night in the given currency.
    pub fn hotel_min_price_on_date(
        &self,
        hotel_id: i64,
        date: NaiveDate,
        currency: Option<&str>,
    ) -> Result<Option<i64>> {
        let amount = TierQuery::new(self.conn).hotel_min_price_on_date(hotel_id, date)?;
        Ok(amount.map(|a| self.amount_in_currency(Decimal::from(a), currency)))
    }

    /// Today's rate for `currency`. A failed lookup (missing export, broken
    /// row) is logged and reads as "no rate", so amounts stay unconverted.
    pub fn todays_rate(&self, currency: &str) -> Option<ExchangeRate> {
        match RateQuery::new(self.conn).latest(currency, Utc::now().date_naive()) {
            Ok(rate) => rate,
            Err(e) => {
                debug!(currency, error = %e, "rate lookup failed");
                None
            }
        }
    }

    /// Convert using today's rate for `currency`. Without a currency, or when
    /// the rate cannot be found, the amount is returned unconverted.
    pub fn amount_in_currency(&self, amount: Decimal, currency: Option<&str>) -> i64 {
        let rate = currency.and_then(|code| self.todays_rate(code));
        self.convert(amount, rate.as_ref())
    }
}

fn no_price(subject: String, stay: &StayRequest) -> PricingError {
    PricingError::NoPriceAvailable {
        subject,
        from: stay.from_date(),
        to: stay.to_date(),
        guests: stay.guests(),
    }
}

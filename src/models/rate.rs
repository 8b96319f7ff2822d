use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RateSource
// ---------------------------------------------------------------------------

/// Which column of an exchange rate row is used for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// The central bank rate (`official_rate`).
    #[default]
    Official,
    /// The commercial rate (`rate`).
    Market,
}

// ---------------------------------------------------------------------------
// ExchangeRate
// ---------------------------------------------------------------------------

/// `nominal` units of `currency` cost `official_rate` (or `rate`) units of the
/// base currency as of `date`. Rates are exact decimals as published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: String,
    pub date: NaiveDate,
    pub nominal: i64,
    pub official_rate: Option<Decimal>,
    pub rate: Option<Decimal>,
}

impl ExchangeRate {
    pub fn selected(&self, source: RateSource) -> Option<Decimal> {
        match source {
            RateSource::Official => self.official_rate,
            RateSource::Market => self.rate,
        }
    }
}

/// Short symbol for a currency code; roubles for anything unknown.
pub fn currency_symbol(code: &str) -> &'static str {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "JPY" => "¥",
        "GBP" => "£",
        _ => "rub",
    }
}

/// Long display name for a currency code; roubles for anything unknown.
pub fn currency_display_name(code: &str) -> &'static str {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "US Dollars",
        "EUR" => "Euro",
        _ => "Roubles",
    }
}

use std::collections::HashMap;
use std::path::PathBuf;

use crate::models::RateSource;

/// Currency assumed when the client has not picked one.
pub const DEFAULT_CURRENCY: &str = "RUB";

pub const META_FILE: &str = "meta.json";

/// Data file name for every table the SDK knows how to load.
pub fn table_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("hotels", "hotels.ndjson"),
        ("rooms", "rooms.ndjson"),
        ("settlement_variants", "settlement_variants.ndjson"),
        ("place_prices", "place_prices.ndjson"),
        ("availability", "availability.ndjson"),
        ("room_discount_policies", "room_discount_policies.ndjson"),
        ("room_discounts", "room_discounts.ndjson"),
        ("exchange_rates", "exchange_rates.ndjson"),
    ])
}

pub fn json_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([("meta", META_FILE)])
}

/// Column types used when reading each table, in DuckDB `read_json` struct
/// notation. Tables not listed here fall back to auto-detection.
pub fn table_schema(table: &str) -> Option<&'static str> {
    let schema = match table {
        "hotels" => {
            "{'id': 'BIGINT', 'name': 'VARCHAR', 'city': 'VARCHAR', 'starcount': 'INTEGER', \
             'best_offer': 'BOOLEAN', 'in_top10': 'BOOLEAN', 'current_amount': 'BIGINT'}"
        }
        "rooms" => "{'id': 'BIGINT', 'hotel_id': 'BIGINT', 'name': 'VARCHAR'}",
        "settlement_variants" => "{'id': 'BIGINT', 'room_id': 'BIGINT', 'settlement': 'INTEGER'}",
        "place_prices" => "{'settlement_id': 'BIGINT', 'date': 'DATE', 'amount': 'BIGINT'}",
        "availability" => {
            "{'room_id': 'BIGINT', 'date': 'DATE', 'placecount': 'INTEGER', 'min_days': 'INTEGER'}"
        }
        "room_discount_policies" => {
            "{'room_id': 'BIGINT', 'ub': 'BOOLEAN', 'ub_discount': 'INTEGER', \
             'gb': 'BOOLEAN', 'gb_discount': 'INTEGER', 'gb_days': 'INTEGER', 'gb_penalty': 'INTEGER', \
             'nr': 'BOOLEAN', 'nr_discount': 'INTEGER'}"
        }
        "room_discounts" => {
            "{'discount_id': 'BIGINT', 'room_id': 'BIGINT', 'date': 'DATE', 'value': 'INTEGER'}"
        }
        "exchange_rates" => {
            "{'currency': 'VARCHAR', 'date': 'DATE', 'nominal': 'INTEGER', \
             'official_rate': 'DOUBLE', 'rate': 'DOUBLE'}"
        }
        _ => return None,
    };
    Some(schema)
}

pub fn default_data_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("booking-pricing-sdk")
    } else {
        PathBuf::from(".booking-pricing-sdk-cache")
    }
}

// ---------------------------------------------------------------------------
// PricingConfig
// ---------------------------------------------------------------------------

/// Knobs that change how quotes are computed and presented.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Which exchange-rate column is authoritative for conversion.
    pub rate_source: RateSource,
    /// Currency code used when the client has no preference.
    pub default_currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rate_source: RateSource::Official,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl PricingConfig {
    /// Load overrides from the environment (and a `.env` file, if present).
    ///
    /// Reads `BOOKING_OFFICIAL_RATE` (`true`/`false`/`1`/`0`) and
    /// `BOOKING_CURRENCY`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Overwrite only the settings the environment actually provides.
    pub fn apply_env(&mut self) {
        let _ = dotenvy::dotenv();

        if let Ok(val) = std::env::var("BOOKING_OFFICIAL_RATE") {
            if let Some(official) = parse_flag(&val) {
                self.rate_source = if official {
                    RateSource::Official
                } else {
                    RateSource::Market
                };
            }
        }
        if let Ok(code) = std::env::var("BOOKING_CURRENCY") {
            let code = code.trim();
            if !code.is_empty() {
                self.default_currency = code.to_uppercase();
            }
        }
    }
}

pub(crate) fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

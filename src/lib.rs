//! Booking pricing SDK for Rust.
//!
//! Quotes hotel stays from exported booking data: resolves the price tier
//! that fits the guests, sums its nightly prices, applies the room's
//! unconditional / guaranteed / non-refundable policies and converts the
//! result into the client's currency. Data exports (NDJSON, one file per
//! table) are read from a local directory, optionally synced from a remote,
//! and queried in-process via DuckDB.
//!
//! # Quick start
//!
//! ```no_run
//! use booking_pricing::{BookingPricing, PolicyKind, StayRequest};
//!
//! let sdk = BookingPricing::builder()
//!     .data_dir("/var/lib/booking/export")
//!     .offline(true)
//!     .build()
//!     .unwrap();
//!
//! let stay = StayRequest::parse("2025-06-01", "2025-06-04", 2).unwrap();
//! let rate = sdk.user_rate(Some("EUR"));
//! let quote = sdk
//!     .quotes()
//!     .price_variants(42, &stay, rate.as_ref(), Some(PolicyKind::Gb))
//!     .unwrap();
//! println!("{} variants, total {}", quote.variant_count(), quote.total_cost);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod pricing;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncBookingPricing;
pub use cache::CacheManager;
pub use config::PricingConfig;
pub use connection::Connection;
pub use error::{PricingError, Result};
pub use models::{
    currency_display_name, currency_symbol, DiscountPolicy, ExchangeRate, Hotel, PolicyKind,
    PriceQuote, PriceVariant, RateSource, SettlementVariant, StarCategory, StayRequest,
};
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

// ---------------------------------------------------------------------------
// BookingPricingBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BookingPricing`] instance.
///
/// Use [`BookingPricing::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](BookingPricingBuilder::build).
#[derive(Debug, Clone)]
pub struct BookingPricingBuilder {
    data_dir: Option<PathBuf>,
    offline: bool,
    base_url: Option<String>,
    timeout: Duration,
    pricing: PricingConfig,
}

impl Default for BookingPricingBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            offline: false,
            base_url: None,
            timeout: Duration::from_secs(120),
            pricing: PricingConfig::default(),
        }
    }
}

impl BookingPricingBuilder {
    /// Directory holding the table exports.
    ///
    /// Defaults to the platform cache directory (e.g.
    /// `~/.cache/booking-pricing-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Never download; use local exports only. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Remote location the exports are published at.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// HTTP timeout for export downloads. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Which exchange-rate column conversion uses. Defaults to official.
    pub fn rate_source(mut self, source: RateSource) -> Self {
        self.pricing.rate_source = source;
        self
    }

    /// Currency assumed for clients without a preference. Defaults to `RUB`.
    pub fn default_currency(mut self, code: impl Into<String>) -> Self {
        self.pricing.default_currency = code.into().to_uppercase();
        self
    }

    /// Apply environment overrides (and a `.env` file, if present).
    ///
    /// Reads `BOOKING_DATA_DIR`, `BOOKING_BASE_URL`, `BOOKING_OFFLINE` plus
    /// everything [`PricingConfig::from_env`] reads. Only variables that are
    /// set replace earlier builder settings.
    pub fn from_env(mut self) -> Self {
        self.pricing.apply_env();

        if let Ok(dir) = std::env::var("BOOKING_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(url) = std::env::var("BOOKING_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = Some(url);
            }
        }
        if let Ok(val) = std::env::var("BOOKING_OFFLINE") {
            if let Some(offline) = config::parse_flag(&val) {
                self.offline = offline;
            }
        }
        self
    }

    /// Build the SDK, initializing the data directory and DuckDB connection.
    ///
    /// Tables are loaded lazily on first query.
    pub fn build(self) -> Result<BookingPricing> {
        let mut cache = CacheManager::new(self.data_dir, self.offline, self.timeout)?;
        if let Some(url) = self.base_url {
            cache = cache.with_base_url(url);
        }
        let conn = Connection::new(cache)?;
        Ok(BookingPricing {
            conn,
            config: self.pricing,
        })
    }
}

// ---------------------------------------------------------------------------
// BookingPricing
// ---------------------------------------------------------------------------

/// The main entry point of the SDK.
///
/// Owns the [`Connection`] and the [`PricingConfig`] and hands out borrowing
/// query interfaces.
pub struct BookingPricing {
    conn: Connection,
    config: PricingConfig,
}

impl BookingPricing {
    pub fn builder() -> BookingPricingBuilder {
        BookingPricingBuilder::default()
    }

    /// Wrap an existing connection (tables already registered, for example).
    pub fn with_connection(conn: Connection, config: PricingConfig) -> Self {
        Self { conn, config }
    }

    // -- Query accessors ---------------------------------------------------

    /// Price tier resolution and nightly prices.
    pub fn tiers(&self) -> queries::TierQuery<'_> {
        queries::TierQuery::new(&self.conn)
    }

    pub fn rates(&self) -> queries::RateQuery<'_> {
        queries::RateQuery::new(&self.conn)
    }

    pub fn discounts(&self) -> queries::DiscountQuery<'_> {
        queries::DiscountQuery::new(&self.conn)
    }

    pub fn availability(&self) -> queries::AvailabilityQuery<'_> {
        queries::AvailabilityQuery::new(&self.conn)
    }

    pub fn hotels(&self) -> queries::HotelQuery<'_> {
        queries::HotelQuery::new(&self.conn)
    }

    /// The price calculator, configured with this SDK's [`PricingConfig`].
    pub fn quotes(&self) -> queries::QuoteQuery<'_> {
        queries::QuoteQuery::new(&self.conn, &self.config)
    }

    // -- Currency helpers ----------------------------------------------------

    /// Resolve the client's currency, falling back to the configured default.
    pub fn client_currency<'s>(&'s self, preferred: Option<&'s str>) -> &'s str {
        preferred
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.config.default_currency)
    }

    /// Today's rate for the client's currency (or the default currency).
    ///
    /// `None` means no usable rate (none on record, or the lookup failed),
    /// which callers treat as "show base-currency amounts".
    pub fn user_rate(&self, preferred: Option<&str>) -> Option<ExchangeRate> {
        self.quotes().todays_rate(self.client_currency(preferred))
    }

    pub fn currency_symbol(&self, preferred: Option<&str>) -> &'static str {
        currency_symbol(self.client_currency(preferred))
    }

    pub fn currency_name(&self, preferred: Option<&str>) -> &'static str {
        currency_display_name(self.client_currency(preferred))
    }

    // -- Metadata and utility methods --------------------------------------

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Load the export metadata (`meta.json`).
    pub fn meta(&self) -> Result<serde_json::Value> {
        self.conn.cache.borrow_mut().load_json("meta")
    }

    /// Names of the tables loaded so far.
    pub fn views(&self) -> Vec<String> {
        self.conn.views()
    }

    /// Execute a raw SQL query with `?` placeholders.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Check the remote for a newer export and reload tables if stale.
    ///
    /// Returns `true` if the data was stale.
    pub fn refresh(&self) -> Result<bool> {
        let stale = self.conn.cache.borrow_mut().is_stale()?;
        if stale {
            self.conn.cache.borrow().clear()?;
            self.conn.reset_views();
            info!("booking export was stale; data dir cleared and tables reset");
        }
        Ok(stale)
    }

    /// Release the HTTP client. Loaded tables stay queryable.
    pub fn close(&self) {
        self.conn.cache.borrow_mut().close();
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl fmt::Display for BookingPricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let views = self.conn.views();
        let cache = self.conn.cache.borrow();
        write!(
            f,
            "BookingPricing(data_dir={}, tables=[{}], offline={}, rate_source={:?})",
            cache.data_dir.display(),
            views.join(", "),
            cache.offline,
            self.config.rate_source
        )
    }
}

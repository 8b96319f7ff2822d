//! Async wrapper around [`BookingPricing`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use booking_pricing::{AsyncBookingPricing, StayRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncBookingPricing::builder().offline(true).build().await.unwrap();
//!
//!     let stay = StayRequest::parse("2025-06-01", "2025-06-04", 2).unwrap();
//!     let quote = sdk.price_variants(42, stay, Some("USD".into()), None).await.unwrap();
//!
//!     let rows = sdk.sql("SELECT COUNT(*) FROM hotels", &[]).await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{PricingError, Result};
use crate::models::{PolicyKind, PriceQuote, RateSource, StayRequest};
use crate::BookingPricing;

// ---------------------------------------------------------------------------
// AsyncBookingPricingBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncBookingPricing`] instance.
pub struct AsyncBookingPricingBuilder {
    data_dir: Option<PathBuf>,
    offline: bool,
    base_url: Option<String>,
    timeout: Duration,
    rate_source: Option<RateSource>,
    default_currency: Option<String>,
    from_env: bool,
}

impl Default for AsyncBookingPricingBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            offline: false,
            base_url: None,
            timeout: Duration::from_secs(120),
            rate_source: None,
            default_currency: None,
            from_env: false,
        }
    }
}

impl AsyncBookingPricingBuilder {
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn rate_source(mut self, source: RateSource) -> Self {
        self.rate_source = Some(source);
        self
    }

    pub fn default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = Some(code.into());
        self
    }

    /// Apply environment overrides before the explicit settings.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncBookingPricing> {
        tokio::task::spawn_blocking(move || {
            let mut builder = BookingPricing::builder();
            if self.from_env {
                builder = builder.from_env();
            }
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(source) = self.rate_source {
                builder = builder.rate_source(source);
            }
            if let Some(code) = self.default_currency {
                builder = builder.default_currency(code);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncBookingPricing {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| PricingError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncBookingPricing
// ---------------------------------------------------------------------------

/// Async wrapper around [`BookingPricing`].
///
/// The underlying [`BookingPricing`] is protected by a [`Mutex`] since it
/// uses `RefCell` internally.
pub struct AsyncBookingPricing {
    inner: Arc<Mutex<BookingPricing>>,
}

impl AsyncBookingPricing {
    pub fn builder() -> AsyncBookingPricingBuilder {
        AsyncBookingPricingBuilder::default()
    }

    /// Wrap an already-built SDK.
    pub fn from_sync(sdk: BookingPricing) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use booking_pricing::AsyncBookingPricing;
    /// # async fn example() -> booking_pricing::Result<()> {
    /// # let sdk = AsyncBookingPricing::builder().build().await?;
    /// let hotels = sdk.run(|s| s.hotels().best_offers()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&BookingPricing) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| PricingError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| PricingError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// Quote a room in the client's currency (or the default currency).
    pub async fn price_variants(
        &self,
        room_id: i64,
        stay: StayRequest,
        currency: Option<String>,
        selected: Option<PolicyKind>,
    ) -> Result<PriceQuote> {
        self.run(move |s| {
            let rate = s.user_rate(currency.as_deref());
            s.quotes()
                .price_variants(room_id, &stay, rate.as_ref(), selected)
        })
        .await
    }

    pub async fn meta(&self) -> Result<serde_json::Value> {
        self.run(|s| s.meta()).await
    }

    pub async fn refresh(&self) -> Result<bool> {
        self.run(|s| s.refresh()).await
    }

    pub async fn views(&self) -> Result<Vec<String>> {
        self.run(|s| Ok(s.views())).await
    }

    /// Release the HTTP client held by the SDK.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| PricingError::InvalidArgument("SDK lock poisoned".into()))?;
            sdk.close();
            Ok(())
        })
        .await
        .map_err(|e| PricingError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

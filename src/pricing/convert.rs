//! Conversion from the base (room) currency into the client's currency.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{PricingError, Result};
use crate::models::{ExchangeRate, RateSource};

/// Convert `amount` with `floor(amount * nominal / selected_rate)`.
///
/// The arithmetic is exact decimal, so a rate such as `1.1` floors the way
/// the published figure says it should. Fails with
/// [`PricingError::ConversionUnavailable`] when there is no rate, the
/// selected rate column is null or not positive, the nominal is not positive,
/// or the result does not fit an `i64`.
pub fn convert_amount(
    amount: Decimal,
    rate: Option<&ExchangeRate>,
    source: RateSource,
) -> Result<i64> {
    let rate = rate.ok_or_else(|| {
        PricingError::ConversionUnavailable("no exchange rate for the client currency".into())
    })?;

    let exchange = rate.selected(source).ok_or_else(|| {
        PricingError::ConversionUnavailable(format!(
            "{:?} rate missing for {} on {}",
            source, rate.currency, rate.date
        ))
    })?;

    if exchange <= Decimal::ZERO {
        return Err(PricingError::ConversionUnavailable(format!(
            "unusable rate {} for {} on {}",
            exchange, rate.currency, rate.date
        )));
    }
    if rate.nominal <= 0 {
        return Err(PricingError::ConversionUnavailable(format!(
            "unusable nominal {} for {}",
            rate.nominal, rate.currency
        )));
    }

    amount
        .checked_mul(Decimal::from(rate.nominal))
        .and_then(|scaled| scaled.checked_div(exchange))
        .and_then(|converted| converted.floor().to_i64())
        .ok_or_else(|| {
            PricingError::ConversionUnavailable(format!("conversion of {} overflowed", amount))
        })
}

/// Best-effort conversion: falls back to `floor(amount)` in the base currency
/// when the rate cannot be used.
pub fn convert_or_unconverted(
    amount: Decimal,
    rate: Option<&ExchangeRate>,
    source: RateSource,
) -> i64 {
    match convert_amount(amount, rate, source) {
        Ok(value) => value,
        Err(e) => {
            debug!(%amount, error = %e, "showing unconverted amount");
            floor_i64(amount)
        }
    }
}

/// `floor(amount)`, saturating at the `i64` bounds.
fn floor_i64(amount: Decimal) -> i64 {
    amount.floor().to_i64().unwrap_or(if amount.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

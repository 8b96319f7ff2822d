//! UB / GB / NR discount policy evaluation.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{DiscountPolicy, PolicyKind, PriceQuote, PriceVariant, StayRequest};

/// Amounts a quote is built from, already in the display currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyInputs {
    pub base_total: i64,
    /// Price of the arrival night; only needed for the GB penalty.
    pub first_night: Option<i64>,
    pub nights: i64,
    pub arrival: NaiveDate,
}

impl PolicyInputs {
    pub fn new(stay: &StayRequest, base_total: i64, first_night: Option<i64>) -> Self {
        Self {
            base_total,
            first_night,
            nights: stay.nights(),
            arrival: stay.from_date(),
        }
    }
}

/// Apply a percentage discount.
///
/// Returns the discounted total and the applied percentage, or the untouched
/// base with `None` when `pct` is outside `(0, 100)`.
pub fn discounted(base: i64, pct: i64) -> (Decimal, Option<i64>) {
    let base = Decimal::from(base);
    if 0 < pct && pct < 100 {
        (base * Decimal::from(100 - pct) / Decimal::ONE_HUNDRED, Some(pct))
    } else {
        (base, None)
    }
}

/// GB cancellation penalty charged off the first night.
///
/// With a GB discount in effect the penalty is taken from the discounted
/// night: `first * (100 - discount) * pct / 10000`. Without one it is
/// `first * pct / 100`. `None` when `pct` is outside `(0, 100]`.
pub fn penalty(first_night: i64, gb_discount: Option<i64>, penalty_pct: i64) -> Option<Decimal> {
    if !(0 < penalty_pct && penalty_pct <= 100) {
        return None;
    }
    let charged = Decimal::from(first_night) * Decimal::from(penalty_pct);
    Some(match gb_discount {
        Some(d) => charged * Decimal::from(100 - d) / Decimal::from(10_000),
        None => charged / Decimal::ONE_HUNDRED,
    })
}

/// `total / nights`; zero when there are no nights to spread over.
fn per_night(total: Decimal, nights: i64) -> Decimal {
    total
        .checked_div(Decimal::from(nights))
        .unwrap_or(Decimal::ZERO)
}

fn variant(policy: &DiscountPolicy, kind: PolicyKind, inputs: &PolicyInputs) -> PriceVariant {
    let (price, discount) = discounted(inputs.base_total, policy.discount_pct(kind));
    let (penalty, guarantee_deadline) = match kind {
        PolicyKind::Gb => (
            inputs
                .first_night
                .and_then(|first| penalty(first, discount, policy.gb_penalty)),
            u64::try_from(policy.gb_days)
                .ok()
                .and_then(|days| inputs.arrival.checked_sub_days(Days::new(days))),
        ),
        _ => (None, None),
    };
    PriceVariant {
        kind,
        price,
        discount,
        average: per_night(price, inputs.nights),
        penalty,
        guarantee_deadline,
    }
}

/// Build the quote for every enabled policy.
///
/// The selected policy (if enabled) comes first, the rest follow in UB, GB,
/// NR order. `total_cost` is the selected variant's price, or the base total
/// when nothing enabled is selected.
pub fn evaluate(
    policy: &DiscountPolicy,
    inputs: &PolicyInputs,
    selected: Option<PolicyKind>,
) -> PriceQuote {
    let mut variants: Vec<PriceVariant> = policy
        .enabled_kinds()
        .into_iter()
        .map(|kind| variant(policy, kind, inputs))
        .collect();

    let mut total_cost = Decimal::from(inputs.base_total);
    if let Some(kind) = selected {
        if let Some(pos) = variants.iter().position(|v| v.kind == kind) {
            let chosen = variants.remove(pos);
            total_cost = chosen.price;
            variants.insert(0, chosen);
        }
    }

    PriceQuote {
        variants,
        base_total: inputs.base_total,
        base_average: per_night(Decimal::from(inputs.base_total), inputs.nights),
        total_cost,
        nights: inputs.nights,
    }
}

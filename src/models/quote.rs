use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::discount::PolicyKind;

// ---------------------------------------------------------------------------
// PriceVariant — one bookable policy with its price
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceVariant {
    pub kind: PolicyKind,
    /// Total for the stay after this policy's discount.
    pub price: Decimal,
    /// Discount percentage, `None` when the policy is sold at full price.
    pub discount: Option<i64>,
    /// `price / nights`.
    pub average: Decimal,
    /// GB only: cancellation penalty charged off the first night.
    pub penalty: Option<Decimal>,
    /// GB only: last day on which the guaranteed booking may be made.
    pub guarantee_deadline: Option<NaiveDate>,
}

impl PriceVariant {
    /// Whether this variant can still be booked on `date`. Only GB variants
    /// carry a deadline; the others are always bookable.
    pub fn is_bookable_on(&self, date: NaiveDate) -> bool {
        match self.guarantee_deadline {
            Some(deadline) => date <= deadline,
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceQuote — everything the presentation layer needs for one room
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Enabled policies, selected one first.
    pub variants: Vec<PriceVariant>,
    /// Undiscounted stay total in the display currency.
    pub base_total: i64,
    /// `base_total / nights`.
    pub base_average: Decimal,
    /// Price of the selected policy, or `base_total` if none is selected.
    pub total_cost: Decimal,
    pub nights: i64,
}

impl PriceQuote {
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn variant(&self, kind: PolicyKind) -> Option<&PriceVariant> {
        self.variants.iter().find(|v| v.kind == kind)
    }

    /// Cheapest variant price, if any policy is offered.
    pub fn cheapest(&self) -> Option<Decimal> {
        self.variants.iter().map(|v| v.price).min()
    }
}

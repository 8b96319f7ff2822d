use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PolicyKind
// ---------------------------------------------------------------------------

/// The three booking policies a room can be sold under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Unconditional booking.
    Ub,
    /// Guaranteed booking, with a cancellation penalty.
    Gb,
    /// Non-refundable.
    Nr,
}

impl PolicyKind {
    /// Fixed priority used when no policy is preselected.
    pub const PRIORITY: [PolicyKind; 3] = [PolicyKind::Ub, PolicyKind::Gb, PolicyKind::Nr];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Ub => "ub",
            PolicyKind::Gb => "gb",
            PolicyKind::Nr => "nr",
        }
    }

    /// Interpret a client-supplied booking type. Anything that is not one of
    /// `ub`, `gb`, `nr` means "nothing selected".
    pub fn parse_selection(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = crate::error::PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ub" => Ok(PolicyKind::Ub),
            "gb" => Ok(PolicyKind::Gb),
            "nr" => Ok(PolicyKind::Nr),
            other => Err(crate::error::PricingError::InvalidArgument(format!(
                "unknown booking policy '{}'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// DiscountPolicy — per-room configuration of the three policies
// ---------------------------------------------------------------------------

/// Room-level policy bundle (one row of `room_discount_policies`).
///
/// Percentages outside `(0, 100)` are valid and mean "policy offered at full
/// price". The GB penalty is applied only when it lies in `(0, 100]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    pub room_id: i64,
    #[serde(default)]
    pub ub: bool,
    #[serde(default)]
    pub ub_discount: i64,
    #[serde(default)]
    pub gb: bool,
    #[serde(default)]
    pub gb_discount: i64,
    /// Minimum days between booking and arrival for a guaranteed booking.
    #[serde(default)]
    pub gb_days: i64,
    /// Cancellation penalty, percent of the first night.
    #[serde(default)]
    pub gb_penalty: i64,
    #[serde(default)]
    pub nr: bool,
    #[serde(default)]
    pub nr_discount: i64,
}

impl DiscountPolicy {
    /// A room with no policy row: nothing offered.
    pub fn disabled(room_id: i64) -> Self {
        Self {
            room_id,
            ..Default::default()
        }
    }

    pub fn is_enabled(&self, kind: PolicyKind) -> bool {
        match kind {
            PolicyKind::Ub => self.ub,
            PolicyKind::Gb => self.gb,
            PolicyKind::Nr => self.nr,
        }
    }

    pub fn discount_pct(&self, kind: PolicyKind) -> i64 {
        match kind {
            PolicyKind::Ub => self.ub_discount,
            PolicyKind::Gb => self.gb_discount,
            PolicyKind::Nr => self.nr_discount,
        }
    }

    pub fn enabled_kinds(&self) -> Vec<PolicyKind> {
        PolicyKind::PRIORITY
            .into_iter()
            .filter(|k| self.is_enabled(*k))
            .collect()
    }

    /// Whether the GB penalty percentage will be charged at all.
    pub fn has_gb_penalty(&self) -> bool {
        self.gb && 0 < self.gb_penalty && self.gb_penalty <= 100
    }
}

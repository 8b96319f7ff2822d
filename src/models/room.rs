use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// SettlementVariant — a priced capacity tier of a room
// ---------------------------------------------------------------------------

/// A price tier: the room sold for up to `settlement` guests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementVariant {
    pub id: i64,
    pub room_id: i64,
    /// Number of guests this tier accommodates.
    pub settlement: i64,
}

impl SettlementVariant {
    /// Guest slots as shown next to a quote (one per accommodated guest).
    pub fn guest_slots(&self) -> std::ops::Range<i64> {
        0..self.settlement.max(0)
    }
}

/// Price of one night for one tier. A zero amount means "not on sale".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePrice {
    pub settlement_id: i64,
    pub date: NaiveDate,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub room_id: i64,
    pub date: NaiveDate,
    pub placecount: i64,
    pub min_days: Option<i64>,
}

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StarCategory — the classification stored in `hotels.starcount`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarCategory {
    MiniHotel,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
    Hostel,
    Apartments,
}

impl StarCategory {
    pub const ALL: [StarCategory; 7] = [
        StarCategory::MiniHotel,
        StarCategory::TwoStar,
        StarCategory::ThreeStar,
        StarCategory::FourStar,
        StarCategory::FiveStar,
        StarCategory::Hostel,
        StarCategory::Apartments,
    ];

    /// The integer code stored in the `starcount` column.
    pub fn code(self) -> i32 {
        match self {
            StarCategory::MiniHotel => 1,
            StarCategory::TwoStar => 2,
            StarCategory::ThreeStar => 3,
            StarCategory::FourStar => 4,
            StarCategory::FiveStar => 5,
            StarCategory::Hostel => 6,
            StarCategory::Apartments => 7,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.code()) == code)
    }
}

// ---------------------------------------------------------------------------
// Hotel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    /// City slug, e.g. `"moscow"`.
    pub city: Option<String>,
    pub starcount: Option<i64>,
    #[serde(default)]
    pub best_offer: Option<bool>,
    #[serde(default)]
    pub in_top10: Option<bool>,
    pub current_amount: Option<i64>,
}

impl Hotel {
    pub fn category(&self) -> Option<StarCategory> {
        self.starcount.and_then(StarCategory::from_code)
    }
}

/// Number of hotels per `starcount` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarCount {
    pub starcount: i64,
    pub count: i64,
}

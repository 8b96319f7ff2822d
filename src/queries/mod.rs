//! Query modules for the booking pricing SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes typed methods
//! returning `Result<T>`.

pub mod availability;
pub mod discounts;
pub mod hotels;
pub mod quotes;
pub mod rates;
pub mod tiers;

pub use availability::AvailabilityQuery;
pub use discounts::DiscountQuery;
pub use hotels::HotelQuery;
pub use quotes::QuoteQuery;
pub use rates::RateQuery;
pub use tiers::TierQuery;

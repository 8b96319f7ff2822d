//! Pure pricing logic: currency conversion, discount policies and the small
//! layout helpers used to present prices.
//!
//! Nothing here touches the database; the query layer feeds these functions
//! with already-fetched amounts.

pub mod convert;
pub mod layout;
pub mod policy;

pub use convert::{convert_amount, convert_or_unconverted};
pub use layout::{intro_columns, values_by_dates, INTRO_COLUMNS};
pub use policy::{discounted, evaluate, penalty, PolicyInputs};

pub mod discount;
pub mod hotel;
pub mod quote;
pub mod rate;
pub mod room;
pub mod stay;

pub use discount::*;
pub use hotel::*;
pub use quote::*;
pub use rate::*;
pub use room::*;
pub use stay::*;

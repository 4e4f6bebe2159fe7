pub mod promotions;
pub mod quotes;
pub mod tracking;

pub mod promotion;
pub mod shipping;
pub mod tracking;

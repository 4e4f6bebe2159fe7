pub mod promotion_repository;
pub mod quote_repository;
pub mod reference_data_repository;
pub mod tracking_repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use promotion_repository::PostgresPromotionRepository;
pub use quote_repository::PostgresQuoteRepository;
pub use reference_data_repository::PostgresReferenceDataRepository;
pub use tracking_repository::PostgresTrackingRepository;

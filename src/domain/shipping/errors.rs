use thiserror::Error;
use uuid::Uuid;

use crate::domain::promotion::PromotionError;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum ShippingError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Promotion error: {0}")]
  Promotion(#[from] PromotionError),

  #[error("Quote not found: {0}")]
  QuoteNotFound(Uuid),

  #[error("Quote {0} is already confirmed")]
  QuoteAlreadyConfirmed(Uuid),

  #[error("Reference data missing: {0}")]
  ReferenceDataMissing(String),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

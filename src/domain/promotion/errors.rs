use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{DenialReason, ValueObjectError};

#[derive(Debug, Error)]
pub enum PromotionError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Promotion not found: {0}")]
  PromotionNotFound(Uuid),

  #[error("Promotion code not found: {0}")]
  CodeNotFound(String),

  #[error("Promotion code '{0}' already exists")]
  CodeAlreadyExists(String),

  #[error("Promotion not eligible: {0}")]
  NotEligible(DenialReason),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

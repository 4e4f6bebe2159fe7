use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum TrackingError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Stage index {index} is out of range for {stage_count} stages")]
  StageIndexOutOfRange { index: usize, stage_count: usize },

  #[error("Package {0} is already delivered")]
  AlreadyDelivered(Uuid),

  #[error("Tracking not found for package: {0}")]
  TrackingNotFound(Uuid),

  #[error("Tracking already exists for package: {0}")]
  TrackingAlreadyExists(Uuid),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

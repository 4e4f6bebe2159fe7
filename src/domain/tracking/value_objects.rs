use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid stage name: {0}")]
  InvalidStageName(String),
  #[error("Invalid stage list: {0}")]
  InvalidStageList(String),
}

// Stage Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageName(String);

impl StageName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidStageName(
        "Stage name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidStageName(
        "Stage name cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

/// Status of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
  Pending,
  Current,
  Completed,
}

impl StageStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      StageStatus::Pending => "pending",
      StageStatus::Current => "current",
      StageStatus::Completed => "completed",
    }
  }
}

/// Status of the sequence as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceState {
  NotStarted,
  InProgress,
  Delivered,
}

impl SequenceState {
  pub fn as_str(&self) -> &'static str {
    match self {
      SequenceState::NotStarted => "not_started",
      SequenceState::InProgress => "in_progress",
      SequenceState::Delivered => "delivered",
    }
  }
}

impl fmt::Display for SequenceState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

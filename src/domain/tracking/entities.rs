use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::TrackingError;
use super::progression::{advance_to, current_index_of, next_target_index, sequence_state};
use super::value_objects::{SequenceState, StageName, StageStatus, ValueObjectError};

// Tracking Stage - one named step of a package's journey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingStage {
  pub name: String,
  pub is_current: bool,
  pub completed_at: Option<DateTime<Utc>>,
}

impl TrackingStage {
  pub fn pending(name: StageName) -> Self {
    Self {
      name: name.into_inner(),
      is_current: false,
      completed_at: None,
    }
  }

  pub fn is_completed(&self) -> bool {
    self.completed_at.is_some()
  }

  pub fn status(&self) -> StageStatus {
    if self.is_current {
      StageStatus::Current
    } else if self.is_completed() {
      StageStatus::Completed
    } else {
      StageStatus::Pending
    }
  }
}

// Package Tracking - the stage sequence owned by one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTracking {
  pub package_id: Uuid,
  pub stages: Vec<TrackingStage>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl PackageTracking {
  pub fn new(
    package_id: Uuid,
    stage_names: Vec<StageName>,
    now: DateTime<Utc>,
  ) -> Result<Self, ValueObjectError> {
    if stage_names.is_empty() {
      return Err(ValueObjectError::InvalidStageList(
        "At least one stage is required".to_string(),
      ));
    }

    Ok(Self {
      package_id,
      stages: stage_names.into_iter().map(TrackingStage::pending).collect(),
      created_at: now,
      updated_at: now,
    })
  }

  /// Makes `target_index` the authoritative position of the package.
  pub fn advance(&mut self, target_index: usize, now: DateTime<Utc>) -> Result<(), TrackingError> {
    self.stages = advance_to(&self.stages, target_index, now)?;
    self.updated_at = now;
    Ok(())
  }

  pub fn state(&self) -> SequenceState {
    sequence_state(&self.stages)
  }

  pub fn current_index(&self) -> Option<usize> {
    current_index_of(&self.stages)
  }

  pub fn next_target(&self) -> Option<usize> {
    next_target_index(&self.stages)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn names(values: &[&str]) -> Vec<StageName> {
    values
      .iter()
      .map(|v| StageName::new(v.to_string()).unwrap())
      .collect()
  }

  #[test]
  fn test_new_tracking_is_not_started() {
    let opened_at = Utc::now();
    let tracking = PackageTracking::new(
      Uuid::new_v4(),
      names(&["Received", "In transit", "Delivered"]),
      opened_at,
    )
    .unwrap();
    assert_eq!(tracking.created_at, opened_at);
    assert_eq!(tracking.updated_at, opened_at);
    assert_eq!(tracking.state(), SequenceState::NotStarted);
    assert!(tracking.stages.iter().all(|s| s.status() == StageStatus::Pending));
    assert_eq!(tracking.next_target(), Some(0));
  }

  #[test]
  fn test_empty_stage_list_is_rejected() {
    assert!(PackageTracking::new(Uuid::new_v4(), Vec::new(), Utc::now()).is_err());
  }

  #[test]
  fn test_advance_updates_timestamp_and_state() {
    let now = Utc::now();
    let mut tracking = PackageTracking::new(
      Uuid::new_v4(),
      names(&["Received", "In transit", "Delivered"]),
      now,
    )
    .unwrap();

    tracking.advance(1, now).unwrap();
    assert_eq!(tracking.updated_at, now);
    assert_eq!(tracking.state(), SequenceState::InProgress);
    assert_eq!(tracking.current_index(), Some(1));

    assert!(tracking.advance(3, now).is_err());
    assert_eq!(tracking.current_index(), Some(1));
  }
}

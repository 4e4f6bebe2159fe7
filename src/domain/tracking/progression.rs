//! Tracking stage progression.
//!
//! A sequence holds at most one current stage. Everything before it is
//! completed, everything after it is pending. The last stage is never
//! current: reaching it means the package is delivered.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::entities::TrackingStage;
use super::errors::TrackingError;
use super::value_objects::SequenceState;

/// Returns a new sequence in which `target_index` is the package's position.
///
/// Earlier stages keep their original completion time when they have one.
/// Later stages are reset to pending, even if they were completed before.
pub fn advance_to(
  stages: &[TrackingStage],
  target_index: usize,
  now: DateTime<Utc>,
) -> Result<Vec<TrackingStage>, TrackingError> {
  if target_index >= stages.len() {
    return Err(TrackingError::StageIndexOutOfRange {
      index: target_index,
      stage_count: stages.len(),
    });
  }
  let last_index = stages.len() - 1;

  let advanced = stages
    .iter()
    .enumerate()
    .map(|(index, stage)| {
      let (is_current, completed_at) = match index.cmp(&target_index) {
        Ordering::Less => (false, stage.completed_at.or(Some(now))),
        Ordering::Equal => (target_index < last_index, Some(now)),
        Ordering::Greater => (false, None),
      };
      TrackingStage {
        name: stage.name.clone(),
        is_current,
        completed_at,
      }
    })
    .collect();

  Ok(advanced)
}

/// The stage the package is at: the current stage if one is flagged,
/// otherwise the first pending stage. `None` once every stage is complete.
pub fn current_index_of(stages: &[TrackingStage]) -> Option<usize> {
  if let Some(index) = stages.iter().position(|stage| stage.is_current) {
    return Some(index);
  }
  stages.iter().position(|stage| !stage.is_completed())
}

/// Largest index with a completion time, if any.
pub fn last_completed_index(stages: &[TrackingStage]) -> Option<usize> {
  stages.iter().rposition(TrackingStage::is_completed)
}

/// Default target for an "advance one step" request.
pub fn next_target_index(stages: &[TrackingStage]) -> Option<usize> {
  match stages.iter().position(|stage| stage.is_current) {
    Some(index) if index + 1 < stages.len() => Some(index + 1),
    Some(_) => None,
    None => current_index_of(stages),
  }
}

pub fn sequence_state(stages: &[TrackingStage]) -> SequenceState {
  if stages.iter().any(|stage| stage.is_current) {
    return SequenceState::InProgress;
  }
  match stages.last() {
    Some(last) if last.is_completed() => SequenceState::Delivered,
    _ if stages.iter().any(TrackingStage::is_completed) => SequenceState::InProgress,
    _ => SequenceState::NotStarted,
  }
}

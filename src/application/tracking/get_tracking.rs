use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{PackageTracking, TrackingError, TrackingService};

#[derive(Debug, Deserialize)]
pub struct GetTrackingCommand {
  pub package_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TrackingStageDto {
  pub index: usize,
  pub name: String,
  pub status: String,
  pub is_current: bool,
  pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct TrackingDto {
  pub package_id: Uuid,
  pub state: String,
  pub current_index: Option<usize>,
  pub stages: Vec<TrackingStageDto>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<&PackageTracking> for TrackingDto {
  fn from(tracking: &PackageTracking) -> Self {
    Self {
      package_id: tracking.package_id,
      state: tracking.state().as_str().to_string(),
      current_index: tracking.current_index(),
      stages: tracking
        .stages
        .iter()
        .enumerate()
        .map(|(index, stage)| TrackingStageDto {
          index,
          name: stage.name.clone(),
          status: stage.status().as_str().to_string(),
          is_current: stage.is_current,
          completed_at: stage.completed_at,
        })
        .collect(),
      created_at: tracking.created_at,
      updated_at: tracking.updated_at,
    }
  }
}

pub struct GetTrackingUseCase {
  tracking_service: Arc<TrackingService>,
}

impl GetTrackingUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn execute(&self, command: GetTrackingCommand) -> Result<TrackingDto, TrackingError> {
    let tracking = self
      .tracking_service
      .get_tracking(command.package_id)
      .await?;
    Ok(TrackingDto::from(&tracking))
  }
}

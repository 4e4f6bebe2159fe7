use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{TrackingError, TrackingService};

use super::get_tracking::TrackingDto;

#[derive(Debug, Deserialize)]
pub struct AdvanceTrackingCommand {
  pub package_id: Uuid,
  /// Zero-based stage to move to; one step forward when absent
  pub target_index: Option<usize>,
}

pub struct AdvanceTrackingUseCase {
  tracking_service: Arc<TrackingService>,
}

impl AdvanceTrackingUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn execute(&self, command: AdvanceTrackingCommand) -> Result<TrackingDto, TrackingError> {
    let tracking = self
      .tracking_service
      .advance(command.package_id, command.target_index, Utc::now())
      .await?;
    Ok(TrackingDto::from(&tracking))
  }
}

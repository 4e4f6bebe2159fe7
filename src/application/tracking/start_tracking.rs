use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::tracking::{StageName, TrackingError, TrackingService};

use super::get_tracking::TrackingDto;

#[derive(Debug, Deserialize)]
pub struct StartTrackingCommand {
  pub package_id: Uuid,
  /// Custom stage names; the configured defaults are used when absent
  pub stages: Option<Vec<String>>,
}

pub struct StartTrackingUseCase {
  tracking_service: Arc<TrackingService>,
}

impl StartTrackingUseCase {
  pub fn new(tracking_service: Arc<TrackingService>) -> Self {
    Self { tracking_service }
  }

  pub async fn execute(&self, command: StartTrackingCommand) -> Result<TrackingDto, TrackingError> {
    let stage_names = command
      .stages
      .map(|names| {
        names
          .into_iter()
          .map(StageName::new)
          .collect::<Result<Vec<_>, _>>()
      })
      .transpose()?;

    let tracking = self
      .tracking_service
      .start_tracking(command.package_id, stage_names, Utc::now())
      .await?;
    Ok(TrackingDto::from(&tracking))
  }
}

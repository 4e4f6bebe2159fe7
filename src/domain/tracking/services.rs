use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::PackageTracking;
use super::errors::TrackingError;
use super::progression::last_completed_index;
use super::ports::TrackingRepository;
use super::value_objects::StageName;

pub struct TrackingService {
  tracking_repo: Arc<dyn TrackingRepository>,
  default_stages: Vec<StageName>,
}

impl TrackingService {
  pub fn new(tracking_repo: Arc<dyn TrackingRepository>, default_stages: Vec<StageName>) -> Self {
    Self {
      tracking_repo,
      default_stages,
    }
  }

  /// Opens a tracking sequence for a package, using the configured stages
  /// unless the caller supplies its own.
  pub async fn start_tracking(
    &self,
    package_id: Uuid,
    stage_names: Option<Vec<StageName>>,
    now: DateTime<Utc>,
  ) -> Result<PackageTracking, TrackingError> {
    if self
      .tracking_repo
      .find_by_package_id(package_id)
      .await?
      .is_some()
    {
      return Err(TrackingError::TrackingAlreadyExists(package_id));
    }

    let stage_names = stage_names.unwrap_or_else(|| self.default_stages.clone());
    let tracking = PackageTracking::new(package_id, stage_names, now)?;
    let created = self.tracking_repo.create(tracking).await?;

    tracing::info!(
      %package_id,
      stages = created.stages.len(),
      "Package tracking started"
    );
    Ok(created)
  }

  pub async fn get_tracking(&self, package_id: Uuid) -> Result<PackageTracking, TrackingError> {
    self
      .tracking_repo
      .find_by_package_id(package_id)
      .await?
      .ok_or(TrackingError::TrackingNotFound(package_id))
  }

  /// Moves a package to `target_index`, or one step forward when no target is given.
  pub async fn advance(
    &self,
    package_id: Uuid,
    target_index: Option<usize>,
    now: DateTime<Utc>,
  ) -> Result<PackageTracking, TrackingError> {
    let mut tracking = self.get_tracking(package_id).await?;

    let target = match target_index {
      Some(index) => index,
      None => tracking
        .next_target()
        .ok_or(TrackingError::AlreadyDelivered(package_id))?,
    };

    let previous = last_completed_index(&tracking.stages);
    tracking.advance(target, now)?;

    if previous.is_some_and(|index| target < index) {
      tracing::warn!(
        %package_id,
        from = ?previous,
        to = target,
        "Tracking moved back, later stages were reset"
      );
    }

    let updated = self.tracking_repo.update(tracking).await?;
    tracing::info!(
      %package_id,
      target,
      state = %updated.state(),
      "Package tracking advanced"
    );
    Ok(updated)
  }
}

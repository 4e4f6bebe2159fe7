use async_trait::async_trait;
use uuid::Uuid;

use super::entities::PackageTracking;
use super::errors::TrackingError;

#[async_trait]
pub trait TrackingRepository: Send + Sync {
  async fn create(&self, tracking: PackageTracking) -> Result<PackageTracking, TrackingError>;
  async fn update(&self, tracking: PackageTracking) -> Result<PackageTracking, TrackingError>;
  async fn find_by_package_id(
    &self,
    package_id: Uuid,
  ) -> Result<Option<PackageTracking>, TrackingError>;
}

use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Promotion;
use super::errors::PromotionError;

#[async_trait]
pub trait PromotionRepository: Send + Sync {
  async fn create(&self, promotion: Promotion) -> Result<Promotion, PromotionError>;
  async fn update(&self, promotion: Promotion) -> Result<Promotion, PromotionError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Promotion>, PromotionError>;
  async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>, PromotionError>;
  async fn list(&self, include_inactive: bool) -> Result<Vec<Promotion>, PromotionError>;
  /// Records one redemption. Must be atomic with respect to the usage cap:
  /// returns `None` when the promotion is missing or already at its limit.
  async fn increment_usage(&self, id: Uuid) -> Result<Option<Promotion>, PromotionError>;
}

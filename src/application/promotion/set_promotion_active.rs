use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::promotion::{PromotionError, PromotionService};

use super::create_promotion::PromotionDto;

#[derive(Debug, Deserialize)]
pub struct SetPromotionActiveCommand {
  pub promotion_id: Uuid,
  pub active: bool,
}

pub struct SetPromotionActiveUseCase {
  promotion_service: Arc<PromotionService>,
}

impl SetPromotionActiveUseCase {
  pub fn new(promotion_service: Arc<PromotionService>) -> Self {
    Self { promotion_service }
  }

  pub async fn execute(&self, command: SetPromotionActiveCommand) -> Result<PromotionDto, PromotionError> {
    let promotion = self
      .promotion_service
      .set_active(command.promotion_id, command.active, Utc::now())
      .await?;
    Ok(PromotionDto::from(&promotion))
  }
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::promotion::{PromotionError, PromotionService};

use super::create_promotion::PromotionDto;

#[derive(Debug, Default, Deserialize)]
pub struct ListPromotionsCommand {
  #[serde(default)]
  pub include_inactive: bool,
}

#[derive(Debug, Serialize)]
pub struct ListPromotionsResponse {
  pub promotions: Vec<PromotionDto>,
  pub total: usize,
}

pub struct ListPromotionsUseCase {
  promotion_service: Arc<PromotionService>,
}

impl ListPromotionsUseCase {
  pub fn new(promotion_service: Arc<PromotionService>) -> Self {
    Self { promotion_service }
  }

  pub async fn execute(
    &self,
    command: ListPromotionsCommand,
  ) -> Result<ListPromotionsResponse, PromotionError> {
    let promotions = self
      .promotion_service
      .list_promotions(command.include_inactive)
      .await?;

    let promotions: Vec<PromotionDto> = promotions.iter().map(PromotionDto::from).collect();
    Ok(ListPromotionsResponse {
      total: promotions.len(),
      promotions,
    })
  }
}

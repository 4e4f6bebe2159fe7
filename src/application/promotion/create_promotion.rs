use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::promotion::{
  DiscountValue, MembershipTier, NewPromotionData, Promotion, PromotionCode, PromotionCondition,
  PromotionError, PromotionService, ValueObjectError,
};
use crate::domain::shipping::ServiceMode;

#[derive(Debug, Deserialize)]
pub struct CreatePromotionCommand {
  pub code: String,
  pub description: Option<String>,
  pub discount_type: String,
  pub discount_value: Decimal,
  pub service_modes: Option<Vec<String>>,
  pub weight_min: Option<Decimal>,
  pub weight_max: Option<Decimal>,
  pub required_membership_tiers: Option<Vec<String>>,
  pub valid_from: NaiveDate,
  pub valid_to: NaiveDate,
  pub usage_limit: Option<u32>,
}

/// Promotion as exposed to administrators
#[derive(Debug, Serialize)]
pub struct PromotionDto {
  pub id: Uuid,
  pub code: String,
  pub description: Option<String>,
  pub active: bool,
  pub discount_type: String,
  pub discount_value: Decimal,
  pub service_modes: Option<Vec<String>>,
  pub weight_min: Option<Decimal>,
  pub weight_max: Option<Decimal>,
  pub required_membership_tiers: Option<Vec<String>>,
  pub valid_from: NaiveDate,
  pub valid_to: NaiveDate,
  pub usage_limit: Option<u32>,
  pub usage_count: u32,
  pub remaining_uses: Option<u32>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<&Promotion> for PromotionDto {
  fn from(promotion: &Promotion) -> Self {
    let condition = &promotion.condition;
    Self {
      id: promotion.id,
      code: promotion.code.value().to_string(),
      description: promotion.description.clone(),
      active: promotion.active,
      discount_type: promotion.discount.kind().to_string(),
      discount_value: promotion.discount.value(),
      service_modes: condition
        .service_modes
        .as_ref()
        .map(|modes| modes.iter().map(|m| m.as_str().to_string()).collect()),
      weight_min: condition.weight_min,
      weight_max: condition.weight_max,
      required_membership_tiers: condition
        .required_membership_tiers
        .as_ref()
        .map(|tiers| tiers.iter().map(|t| t.as_str().to_string()).collect()),
      valid_from: condition.valid_from,
      valid_to: condition.valid_to,
      usage_limit: condition.usage_limit,
      usage_count: condition.usage_count,
      remaining_uses: promotion.remaining_uses(),
      created_at: promotion.created_at,
      updated_at: promotion.updated_at,
    }
  }
}

pub struct CreatePromotionUseCase {
  promotion_service: Arc<PromotionService>,
}

impl CreatePromotionUseCase {
  pub fn new(promotion_service: Arc<PromotionService>) -> Self {
    Self { promotion_service }
  }

  pub async fn execute(&self, command: CreatePromotionCommand) -> Result<PromotionDto, PromotionError> {
    let code = PromotionCode::new(command.code)?;
    let discount = DiscountValue::from_parts(&command.discount_type, command.discount_value)?;

    let service_modes = command
      .service_modes
      .map(|modes| {
        modes
          .iter()
          .map(|mode| {
            ServiceMode::from_str(mode)
              .map_err(|e| ValueObjectError::InvalidCondition(e.to_string()))
          })
          .collect::<Result<BTreeSet<_>, _>>()
      })
      .transpose()?;

    let required_membership_tiers = command
      .required_membership_tiers
      .map(|tiers| {
        tiers
          .iter()
          .map(|tier| MembershipTier::from_str(tier))
          .collect::<Result<BTreeSet<_>, _>>()
      })
      .transpose()?;

    let description = command
      .description
      .map(|d| d.trim().to_string())
      .filter(|d| !d.is_empty());

    let condition = PromotionCondition {
      service_modes,
      weight_min: command.weight_min,
      weight_max: command.weight_max,
      required_membership_tiers,
      usage_limit: command.usage_limit,
      ..PromotionCondition::between(command.valid_from, command.valid_to)
    };

    let data = NewPromotionData {
      code,
      description,
      discount,
      condition,
    };
    let promotion = self
      .promotion_service
      .create_promotion(data, Utc::now())
      .await?;

    Ok(PromotionDto::from(&promotion))
  }
}

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::promotion::{
  Eligibility, EvaluationContext, MembershipTier, PromotionError, PromotionService, ValueObjectError,
};
use crate::domain::shipping::ServiceMode;

#[derive(Debug, Deserialize)]
pub struct EvaluatePromotionCommand {
  pub code: String,
  pub service_mode: String,
  pub weight_kg: Decimal,
  pub membership_tier: Option<String>,
  /// Defaults to today (UTC)
  pub evaluation_date: Option<NaiveDate>,
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityDto {
  pub eligible: bool,
  pub reason: Option<String>,
  pub message: Option<String>,
  pub discount_type: Option<String>,
  pub discount_value: Option<Decimal>,
}

impl From<&Eligibility> for EligibilityDto {
  fn from(eligibility: &Eligibility) -> Self {
    Self {
      eligible: eligibility.eligible,
      reason: eligibility.reason.map(|r| r.as_str().to_string()),
      message: eligibility.reason.map(|r| r.message().to_string()),
      discount_type: eligibility.discount.map(|d| d.kind().to_string()),
      discount_value: eligibility.discount.map(|d| d.value()),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct EvaluatePromotionResponse {
  pub code: String,
  pub evaluation_date: NaiveDate,
  #[serde(flatten)]
  pub eligibility: EligibilityDto,
}

pub struct EvaluatePromotionUseCase {
  promotion_service: Arc<PromotionService>,
}

impl EvaluatePromotionUseCase {
  pub fn new(promotion_service: Arc<PromotionService>) -> Self {
    Self { promotion_service }
  }

  pub async fn execute(
    &self,
    command: EvaluatePromotionCommand,
  ) -> Result<EvaluatePromotionResponse, PromotionError> {
    let service_mode = ServiceMode::from_str(&command.service_mode)
      .map_err(|e| ValueObjectError::InvalidCondition(e.to_string()))?;
    let membership_tier = match command.membership_tier.as_deref() {
      Some(tier) => MembershipTier::from_str(tier)?,
      None => MembershipTier::default(),
    };
    let evaluation_date = command
      .evaluation_date
      .unwrap_or_else(|| Utc::now().date_naive());

    let context = EvaluationContext {
      service_mode,
      weight_kg: command.weight_kg,
      membership_tier,
      evaluation_date,
    };

    let (promotion, eligibility) = self
      .promotion_service
      .evaluate_code(&command.code, &context)
      .await?;

    Ok(EvaluatePromotionResponse {
      code: promotion.code.value().to_string(),
      evaluation_date,
      eligibility: EligibilityDto::from(&eligibility),
    })
  }
}

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::engine::{Eligibility, EvaluationContext, evaluate};
use super::entities::{Promotion, PromotionCondition};
use super::errors::PromotionError;
use super::ports::PromotionRepository;
use super::value_objects::{DenialReason, DiscountValue, PromotionCode};

/// Promotion creation data
pub struct NewPromotionData {
  pub code: PromotionCode,
  pub description: Option<String>,
  pub discount: DiscountValue,
  pub condition: PromotionCondition,
}

pub struct PromotionService {
  promotion_repo: Arc<dyn PromotionRepository>,
}

impl PromotionService {
  pub fn new(promotion_repo: Arc<dyn PromotionRepository>) -> Self {
    Self { promotion_repo }
  }

  pub async fn create_promotion(
    &self,
    data: NewPromotionData,
    now: DateTime<Utc>,
  ) -> Result<Promotion, PromotionError> {
    data.condition.validate()?;

    if self
      .promotion_repo
      .find_by_code(data.code.value())
      .await?
      .is_some()
    {
      return Err(PromotionError::CodeAlreadyExists(data.code.into_inner()));
    }

    // Usage is only ever counted by redemptions
    let condition = PromotionCondition {
      usage_count: 0,
      ..data.condition
    };

    let promotion = Promotion::new(data.code, data.description, data.discount, condition, now);
    let created = self.promotion_repo.create(promotion).await?;

    tracing::info!(
      promotion_id = %created.id,
      code = %created.code,
      "Promotion created"
    );
    Ok(created)
  }

  pub async fn list_promotions(
    &self,
    include_inactive: bool,
  ) -> Result<Vec<Promotion>, PromotionError> {
    self.promotion_repo.list(include_inactive).await
  }

  pub async fn get_by_code(&self, code: &str) -> Result<Promotion, PromotionError> {
    let code = PromotionCode::new(code.to_string())?;
    self
      .promotion_repo
      .find_by_code(code.value())
      .await?
      .ok_or_else(|| PromotionError::CodeNotFound(code.into_inner()))
  }

  /// Looks up a code and decides whether it applies. Ineligibility is a
  /// normal outcome and is returned, not raised.
  pub async fn evaluate_code(
    &self,
    code: &str,
    context: &EvaluationContext,
  ) -> Result<(Promotion, Eligibility), PromotionError> {
    let promotion = self.get_by_code(code).await?;
    let eligibility = evaluate(&promotion, context);

    match eligibility.reason {
      Some(DenialReason::InconsistentWeightBounds) => {
        tracing::warn!(
          promotion_id = %promotion.id,
          code = %promotion.code,
          weight_min = ?promotion.condition.weight_min,
          weight_max = ?promotion.condition.weight_max,
          "Promotion has weight_min greater than weight_max, treating as ineligible"
        );
      }
      Some(reason) => {
        tracing::debug!(code = %promotion.code, %reason, "Promotion denied");
      }
      None => {
        tracing::debug!(code = %promotion.code, "Promotion eligible");
      }
    }

    Ok((promotion, eligibility))
  }

  pub async fn set_active(
    &self,
    promotion_id: Uuid,
    active: bool,
    now: DateTime<Utc>,
  ) -> Result<Promotion, PromotionError> {
    let mut promotion = self
      .promotion_repo
      .find_by_id(promotion_id)
      .await?
      .ok_or(PromotionError::PromotionNotFound(promotion_id))?;

    promotion.set_active(active, now);
    let updated = self.promotion_repo.update(promotion).await?;

    tracing::info!(promotion_id = %updated.id, active, "Promotion activation changed");
    Ok(updated)
  }

  /// Counts one use of a promotion. Called only once the shipment is confirmed.
  pub async fn redeem(&self, promotion_id: Uuid) -> Result<Promotion, PromotionError> {
    match self.promotion_repo.increment_usage(promotion_id).await? {
      Some(promotion) => {
        tracing::info!(
          promotion_id = %promotion.id,
          usage_count = promotion.condition.usage_count,
          usage_limit = ?promotion.condition.usage_limit,
          "Promotion redeemed"
        );
        Ok(promotion)
      }
      None => {
        if self.promotion_repo.find_by_id(promotion_id).await?.is_none() {
          return Err(PromotionError::PromotionNotFound(promotion_id));
        }
        tracing::warn!(%promotion_id, "Redemption rejected, usage limit reached");
        Err(PromotionError::NotEligible(DenialReason::UsageLimitReached))
      }
    }
  }
}

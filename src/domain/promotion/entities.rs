use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::shipping::ServiceMode;

use super::value_objects::{DiscountValue, MembershipTier, PromotionCode, ValueObjectError};

/// Declarative restrictions of a promotion. `None` means "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionCondition {
  pub service_modes: Option<BTreeSet<ServiceMode>>,
  pub weight_min: Option<Decimal>,
  pub weight_max: Option<Decimal>,
  pub required_membership_tiers: Option<BTreeSet<MembershipTier>>,
  pub valid_from: NaiveDate,
  pub valid_to: NaiveDate,
  pub usage_limit: Option<u32>,
  pub usage_count: u32,
}

impl PromotionCondition {
  /// Unrestricted condition over an inclusive date window.
  pub fn between(valid_from: NaiveDate, valid_to: NaiveDate) -> Self {
    Self {
      service_modes: None,
      weight_min: None,
      weight_max: None,
      required_membership_tiers: None,
      valid_from,
      valid_to,
      usage_limit: None,
      usage_count: 0,
    }
  }

  /// Checks administrator input. Stored rows are not re-validated; the engine
  /// copes with inconsistent data on its own.
  pub fn validate(&self) -> Result<(), ValueObjectError> {
    if self.valid_from > self.valid_to {
      return Err(ValueObjectError::InvalidCondition(
        "valid_from must not be after valid_to".to_string(),
      ));
    }
    for bound in [self.weight_min, self.weight_max].into_iter().flatten() {
      if bound.is_sign_negative() {
        return Err(ValueObjectError::InvalidCondition(
          "Weight bounds cannot be negative".to_string(),
        ));
      }
    }
    if let (Some(min), Some(max)) = (self.weight_min, self.weight_max) {
      if min > max {
        return Err(ValueObjectError::InvalidCondition(
          "weight_min must not exceed weight_max".to_string(),
        ));
      }
    }
    Ok(())
  }

  pub fn has_inconsistent_weight_bounds(&self) -> bool {
    matches!((self.weight_min, self.weight_max), (Some(min), Some(max)) if min > max)
  }

  pub fn is_usage_exhausted(&self) -> bool {
    self
      .usage_limit
      .is_some_and(|limit| self.usage_count >= limit)
  }
}

// Promotion - discount code with its eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
  pub id: Uuid,
  pub code: PromotionCode,
  pub description: Option<String>,
  pub active: bool,
  pub discount: DiscountValue,
  pub condition: PromotionCondition,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Promotion {
  pub fn new(
    code: PromotionCode,
    description: Option<String>,
    discount: DiscountValue,
    condition: PromotionCondition,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      code,
      description,
      active: true,
      discount,
      condition,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn set_active(&mut self, active: bool, now: DateTime<Utc>) {
    self.active = active;
    self.updated_at = now;
  }

  pub fn remaining_uses(&self) -> Option<u32> {
    self
      .condition
      .usage_limit
      .map(|limit| limit.saturating_sub(self.condition.usage_count))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rust_decimal_macros::dec;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_condition_validation() {
    let mut condition = PromotionCondition::between(date(2025, 1, 1), date(2025, 12, 31));
    assert!(condition.validate().is_ok());

    condition.weight_min = Some(dec!(10));
    condition.weight_max = Some(dec!(5));
    assert!(condition.validate().is_err());
    assert!(condition.has_inconsistent_weight_bounds());

    let inverted = PromotionCondition::between(date(2025, 12, 31), date(2025, 1, 1));
    assert!(inverted.validate().is_err());
  }

  #[test]
  fn test_usage_exhaustion() {
    let mut condition = PromotionCondition::between(date(2025, 1, 1), date(2025, 12, 31));
    assert!(!condition.is_usage_exhausted());

    condition.usage_limit = Some(2);
    condition.usage_count = 1;
    assert!(!condition.is_usage_exhausted());
    condition.usage_count = 2;
    assert!(condition.is_usage_exhausted());
  }

  #[test]
  fn test_promotion_lifecycle() {
    let created_at = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
    let mut promotion = Promotion::new(
      PromotionCode::new("WELCOME".to_string()).unwrap(),
      None,
      DiscountValue::percentage(dec!(5)).unwrap(),
      PromotionCondition {
        usage_limit: Some(3),
        usage_count: 1,
        ..PromotionCondition::between(date(2025, 1, 1), date(2025, 12, 31))
      },
      created_at,
    );
    assert!(promotion.active);
    assert_eq!(promotion.created_at, created_at);
    assert_eq!(promotion.updated_at, created_at);
    assert_eq!(promotion.remaining_uses(), Some(2));

    let paused_at = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
    promotion.set_active(false, paused_at);
    assert!(!promotion.active);
    assert_eq!(promotion.created_at, created_at);
    assert_eq!(promotion.updated_at, paused_at);
  }
}

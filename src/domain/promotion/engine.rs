//! Promotion eligibility.
//!
//! Conditions are checked in a fixed order and the first failing one is
//! reported, so the same promotion and context always yield the same reason.
//! Evaluation never touches `usage_count`; redemption is recorded by storage
//! once a quote is confirmed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shipping::ServiceMode;

use super::entities::Promotion;
use super::value_objects::{DenialReason, DiscountValue, MembershipTier};

/// Shipment and caller facts a promotion is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationContext {
  pub service_mode: ServiceMode,
  pub weight_kg: Decimal,
  pub membership_tier: MembershipTier,
  pub evaluation_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
  pub eligible: bool,
  pub reason: Option<DenialReason>,
  pub discount: Option<DiscountValue>,
}

impl Eligibility {
  pub fn granted(discount: DiscountValue) -> Self {
    Self {
      eligible: true,
      reason: None,
      discount: Some(discount),
    }
  }

  pub fn denied(reason: DenialReason) -> Self {
    Self {
      eligible: false,
      reason: Some(reason),
      discount: None,
    }
  }

  /// Discount amount against `base_fare`, zero when not eligible.
  pub fn discount_amount(&self, base_fare: Decimal) -> Decimal {
    self
      .discount
      .map(|discount| discount.amount_for(base_fare))
      .unwrap_or(Decimal::ZERO)
  }
}

pub fn evaluate(promotion: &Promotion, context: &EvaluationContext) -> Eligibility {
  match first_denial(promotion, context) {
    Some(reason) => Eligibility::denied(reason),
    None => Eligibility::granted(promotion.discount),
  }
}

fn first_denial(promotion: &Promotion, context: &EvaluationContext) -> Option<DenialReason> {
  let condition = &promotion.condition;

  if !promotion.active {
    return Some(DenialReason::Inactive);
  }

  if context.evaluation_date < condition.valid_from {
    return Some(DenialReason::NotYetStarted);
  }
  if context.evaluation_date > condition.valid_to {
    return Some(DenialReason::Expired);
  }

  if condition.is_usage_exhausted() {
    return Some(DenialReason::UsageLimitReached);
  }

  // An empty set restricts nothing.
  if let Some(tiers) = condition
    .required_membership_tiers
    .as_ref()
    .filter(|tiers| !tiers.is_empty())
  {
    if !tiers.contains(&context.membership_tier) {
      return Some(DenialReason::TierNotEligible);
    }
  }

  if let Some(modes) = condition
    .service_modes
    .as_ref()
    .filter(|modes| !modes.is_empty())
  {
    if !modes.contains(&context.service_mode) {
      return Some(DenialReason::ServiceModeNotEligible);
    }
  }

  if condition.has_inconsistent_weight_bounds() {
    return Some(DenialReason::InconsistentWeightBounds);
  }
  if condition
    .weight_min
    .is_some_and(|min| context.weight_kg < min)
  {
    return Some(DenialReason::BelowMinimumWeight);
  }
  if condition
    .weight_max
    .is_some_and(|max| context.weight_kg > max)
  {
    return Some(DenialReason::AboveMaximumWeight);
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::promotion::entities::PromotionCondition;
  use crate::domain::promotion::value_objects::PromotionCode;
  use chrono::Utc;
  use rust_decimal_macros::dec;
  use std::collections::BTreeSet;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn promotion(condition: PromotionCondition) -> Promotion {
    Promotion::new(
      PromotionCode::new("SPRING25".to_string()).unwrap(),
      None,
      DiscountValue::percentage(dec!(10)).unwrap(),
      condition,
      Utc::now(),
    )
  }

  fn restricted_condition() -> PromotionCondition {
    PromotionCondition {
      service_modes: Some(BTreeSet::from([ServiceMode::Air, ServiceMode::Ground])),
      weight_min: Some(dec!(1)),
      weight_max: Some(dec!(20)),
      required_membership_tiers: Some(BTreeSet::from([MembershipTier::Gold])),
      usage_limit: Some(10),
      usage_count: 3,
      ..PromotionCondition::between(date(2025, 1, 1), date(2025, 12, 31))
    }
  }

  fn context() -> EvaluationContext {
    EvaluationContext {
      service_mode: ServiceMode::Air,
      weight_kg: dec!(5),
      membership_tier: MembershipTier::Gold,
      evaluation_date: date(2025, 6, 1),
    }
  }

  #[test]
  fn test_eligible_when_every_condition_holds() {
    let result = evaluate(&promotion(restricted_condition()), &context());
    assert!(result.eligible);
    assert_eq!(result.reason, None);
    assert_eq!(result.discount_amount(dec!(125)), dec!(12.5));
  }

  #[test]
  fn test_inactive_is_reported_first() {
    let mut promo = promotion(PromotionCondition {
      usage_count: 10,
      ..restricted_condition()
    });
    promo.active = false;
    let ctx = EvaluationContext {
      evaluation_date: date(2030, 1, 1),
      ..context()
    };
    assert_eq!(evaluate(&promo, &ctx).reason, Some(DenialReason::Inactive));
  }

  #[test]
  fn test_date_window_is_inclusive() {
    let promo = promotion(restricted_condition());
    for day in [date(2025, 1, 1), date(2025, 12, 31)] {
      let ctx = EvaluationContext {
        evaluation_date: day,
        ..context()
      };
      assert!(evaluate(&promo, &ctx).eligible);
    }

    let early = EvaluationContext {
      evaluation_date: date(2024, 12, 31),
      ..context()
    };
    assert_eq!(
      evaluate(&promo, &early).reason,
      Some(DenialReason::NotYetStarted)
    );

    let late = EvaluationContext {
      evaluation_date: date(2026, 1, 1),
      ..context()
    };
    assert_eq!(evaluate(&promo, &late).reason, Some(DenialReason::Expired));
  }

  #[test]
  fn test_usage_limit_checked_before_tier_weight_and_service() {
    let promo = promotion(PromotionCondition {
      usage_limit: Some(10),
      usage_count: 10,
      ..restricted_condition()
    });

    let contexts = [
      context(),
      EvaluationContext {
        membership_tier: MembershipTier::Standard,
        service_mode: ServiceMode::Sea,
        weight_kg: dec!(500),
        ..context()
      },
    ];
    for ctx in contexts {
      let result = evaluate(&promo, &ctx);
      assert!(!result.eligible);
      assert_eq!(result.reason, Some(DenialReason::UsageLimitReached));
      assert_eq!(result.discount, None);
    }
  }

  #[test]
  fn test_tier_checked_before_service_mode() {
    let ctx = EvaluationContext {
      membership_tier: MembershipTier::Silver,
      service_mode: ServiceMode::Sea,
      ..context()
    };
    assert_eq!(
      evaluate(&promotion(restricted_condition()), &ctx).reason,
      Some(DenialReason::TierNotEligible)
    );
  }

  #[test]
  fn test_service_mode_checked_before_weight() {
    let ctx = EvaluationContext {
      service_mode: ServiceMode::Sea,
      weight_kg: dec!(0.5),
      ..context()
    };
    assert_eq!(
      evaluate(&promotion(restricted_condition()), &ctx).reason,
      Some(DenialReason::ServiceModeNotEligible)
    );
  }

  #[test]
  fn test_weight_bounds() {
    let promo = promotion(restricted_condition());

    let light = EvaluationContext {
      weight_kg: dec!(0.99),
      ..context()
    };
    assert_eq!(
      evaluate(&promo, &light).reason,
      Some(DenialReason::BelowMinimumWeight)
    );

    let heavy = EvaluationContext {
      weight_kg: dec!(20.01),
      ..context()
    };
    assert_eq!(
      evaluate(&promo, &heavy).reason,
      Some(DenialReason::AboveMaximumWeight)
    );

    for edge in [dec!(1), dec!(20)] {
      let ctx = EvaluationContext {
        weight_kg: edge,
        ..context()
      };
      assert!(evaluate(&promo, &ctx).eligible);
    }
  }

  #[test]
  fn test_inverted_weight_bounds_are_never_eligible() {
    let promo = promotion(PromotionCondition {
      weight_min: Some(dec!(10)),
      weight_max: Some(dec!(2)),
      ..restricted_condition()
    });
    for weight in [dec!(1), dec!(5), dec!(15)] {
      let ctx = EvaluationContext {
        weight_kg: weight,
        ..context()
      };
      assert_eq!(
        evaluate(&promo, &ctx).reason,
        Some(DenialReason::InconsistentWeightBounds)
      );
    }
  }

  #[test]
  fn test_empty_sets_do_not_restrict() {
    let promo = promotion(PromotionCondition {
      service_modes: Some(BTreeSet::new()),
      required_membership_tiers: Some(BTreeSet::new()),
      ..PromotionCondition::between(date(2025, 1, 1), date(2025, 12, 31))
    });
    let ctx = EvaluationContext {
      service_mode: ServiceMode::Sea,
      membership_tier: MembershipTier::Standard,
      ..context()
    };
    assert!(evaluate(&promo, &ctx).eligible);
  }

  #[test]
  fn test_evaluation_does_not_consume_usage() {
    let promo = promotion(restricted_condition());
    let before = promo.condition.usage_count;
    let _ = evaluate(&promo, &context());
    let _ = evaluate(&promo, &context());
    assert_eq!(promo.condition.usage_count, before);
  }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid promotion code: {0}")]
  InvalidCode(String),
  #[error("Invalid membership tier: {0}")]
  InvalidMembershipTier(String),
  #[error("Invalid discount: {0}")]
  InvalidDiscount(String),
  #[error("Invalid promotion condition: {0}")]
  InvalidCondition(String),
}

// Promotion Code - case-insensitive, stored upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromotionCode(String);

impl PromotionCode {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let normalized = value.trim().to_uppercase();
    if normalized.len() < 3 {
      return Err(ValueObjectError::InvalidCode(
        "Promotion code must be at least 3 characters".to_string(),
      ));
    }
    if normalized.len() > 32 {
      return Err(ValueObjectError::InvalidCode(
        "Promotion code cannot exceed 32 characters".to_string(),
      ));
    }
    if !normalized
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
      return Err(ValueObjectError::InvalidCode(
        "Promotion code may only contain letters, digits, '-' and '_'".to_string(),
      ));
    }
    Ok(Self(normalized))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PromotionCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Membership Tier
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
  #[default]
  Standard,
  Silver,
  Gold,
  Platinum,
}

impl MembershipTier {
  pub fn as_str(&self) -> &'static str {
    match self {
      MembershipTier::Standard => "standard",
      MembershipTier::Silver => "silver",
      MembershipTier::Gold => "gold",
      MembershipTier::Platinum => "platinum",
    }
  }
}

impl FromStr for MembershipTier {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "standard" => Ok(MembershipTier::Standard),
      "silver" => Ok(MembershipTier::Silver),
      "gold" => Ok(MembershipTier::Gold),
      "platinum" => Ok(MembershipTier::Platinum),
      _ => Err(ValueObjectError::InvalidMembershipTier(format!(
        "Unknown membership tier: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for MembershipTier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Discount Value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountValue {
  /// Percent of the base fare, in (0, 100]
  Percentage(Decimal),
  /// Flat amount in invoice currency, capped at the base fare
  FixedAmount(Decimal),
}

impl DiscountValue {
  pub fn percentage(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED {
      return Err(ValueObjectError::InvalidDiscount(
        "Percentage must be greater than 0 and at most 100".to_string(),
      ));
    }
    Ok(DiscountValue::Percentage(value))
  }

  pub fn fixed_amount(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidDiscount(
        "Fixed amount must be positive".to_string(),
      ));
    }
    Ok(DiscountValue::FixedAmount(value))
  }

  pub fn from_parts(kind: &str, value: Decimal) -> Result<Self, ValueObjectError> {
    match kind.trim().to_lowercase().as_str() {
      "percentage" => Self::percentage(value),
      "fixed_amount" => Self::fixed_amount(value),
      _ => Err(ValueObjectError::InvalidDiscount(format!(
        "Unknown discount type: {}",
        kind
      ))),
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      DiscountValue::Percentage(_) => "percentage",
      DiscountValue::FixedAmount(_) => "fixed_amount",
    }
  }

  pub fn value(&self) -> Decimal {
    match self {
      DiscountValue::Percentage(v) | DiscountValue::FixedAmount(v) => *v,
    }
  }

  /// Discount to subtract from an invoice whose base fare is `base_fare`.
  /// Never exceeds the base fare.
  pub fn amount_for(&self, base_fare: Decimal) -> Decimal {
    match self {
      DiscountValue::Percentage(percent) => base_fare * (*percent / Decimal::ONE_HUNDRED),
      DiscountValue::FixedAmount(amount) => (*amount).min(base_fare),
    }
  }
}

/// Why a promotion does not apply to a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
  Inactive,
  NotYetStarted,
  Expired,
  UsageLimitReached,
  TierNotEligible,
  ServiceModeNotEligible,
  InconsistentWeightBounds,
  BelowMinimumWeight,
  AboveMaximumWeight,
}

impl DenialReason {
  pub fn as_str(&self) -> &'static str {
    match self {
      DenialReason::Inactive => "inactive",
      DenialReason::NotYetStarted => "not_yet_started",
      DenialReason::Expired => "expired",
      DenialReason::UsageLimitReached => "usage_limit_reached",
      DenialReason::TierNotEligible => "tier_not_eligible",
      DenialReason::ServiceModeNotEligible => "service_mode_not_eligible",
      DenialReason::InconsistentWeightBounds => "inconsistent_weight_bounds",
      DenialReason::BelowMinimumWeight => "below_minimum_weight",
      DenialReason::AboveMaximumWeight => "above_maximum_weight",
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      DenialReason::Inactive => "This promotion is not active",
      DenialReason::NotYetStarted => "This promotion has not started yet",
      DenialReason::Expired => "This promotion has expired",
      DenialReason::UsageLimitReached => "This promotion has reached its usage limit",
      DenialReason::TierNotEligible => "Your membership tier is not eligible for this promotion",
      DenialReason::ServiceModeNotEligible => {
        "This promotion does not apply to the selected service"
      }
      DenialReason::InconsistentWeightBounds => "This promotion is misconfigured",
      DenialReason::BelowMinimumWeight => "The package is below the promotion's minimum weight",
      DenialReason::AboveMaximumWeight => "The package exceeds the promotion's maximum weight",
    }
  }
}

impl fmt::Display for DenialReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

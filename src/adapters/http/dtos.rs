use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::shipping::{MAX_DIMENSION_CM, MAX_WEIGHT_KG};

fn positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
  if *value <= Decimal::ZERO {
    let mut error = ValidationError::new("positive");
    error.message = Some("Value must be greater than zero".into());
    return Err(error);
  }
  Ok(())
}

fn non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
  if value.is_sign_negative() && !value.is_zero() {
    let mut error = ValidationError::new("non_negative");
    error.message = Some("Value cannot be negative".into());
    return Err(error);
  }
  Ok(())
}

fn package_weight(value: &Decimal) -> Result<(), ValidationError> {
  positive_decimal(value)?;
  if *value > MAX_WEIGHT_KG {
    let mut error = ValidationError::new("max_weight");
    error.message = Some(format!("Weight cannot exceed {} kg", MAX_WEIGHT_KG).into());
    return Err(error);
  }
  Ok(())
}

fn package_dimension(value: &Decimal) -> Result<(), ValidationError> {
  positive_decimal(value)?;
  if *value > MAX_DIMENSION_CM {
    let mut error = ValidationError::new("max_dimension");
    error.message = Some(format!("Dimensions cannot exceed {} cm", MAX_DIMENSION_CM).into());
    return Err(error);
  }
  Ok(())
}

/// Request for a shipment quote
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuoteRequest {
  /// Real weight in kilograms
  #[validate(custom(function = "package_weight"))]
  pub weight_kg: Decimal,

  #[validate(custom(function = "package_dimension"))]
  pub length_cm: Decimal,

  #[validate(custom(function = "package_dimension"))]
  pub width_cm: Decimal,

  #[validate(custom(function = "package_dimension"))]
  pub height_cm: Decimal,

  /// air, ground or sea
  #[validate(length(min = 1, max = 16, message = "Service mode is required"))]
  pub service_mode: String,

  /// Caller's membership tier, standard when absent
  pub membership_tier: Option<String>,

  #[validate(length(max = 32, message = "Promotion code cannot exceed 32 characters"))]
  pub promotion_code: Option<String>,
}

/// Request to create a promotion
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePromotionRequest {
  #[validate(length(
    min = 3,
    max = 32,
    message = "Promotion code must be between 3 and 32 characters"
  ))]
  pub code: String,

  #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
  pub description: Option<String>,

  /// percentage or fixed_amount
  #[validate(length(min = 1, message = "Discount type is required"))]
  pub discount_type: String,

  #[validate(custom(function = "positive_decimal"))]
  pub discount_value: Decimal,

  pub service_modes: Option<Vec<String>>,

  #[validate(custom(function = "non_negative_decimal"))]
  pub weight_min: Option<Decimal>,

  #[validate(custom(function = "non_negative_decimal"))]
  pub weight_max: Option<Decimal>,

  pub required_membership_tiers: Option<Vec<String>>,

  pub valid_from: NaiveDate,

  pub valid_to: NaiveDate,

  #[validate(range(min = 1, message = "Usage limit must be at least 1"))]
  pub usage_limit: Option<u32>,
}

/// Request to check a promotion code against a shipment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluatePromotionRequest {
  #[validate(length(min = 1, max = 16, message = "Service mode is required"))]
  pub service_mode: String,

  #[validate(custom(function = "positive_decimal"))]
  pub weight_kg: Decimal,

  pub membership_tier: Option<String>,

  /// Defaults to today
  pub evaluation_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetPromotionActiveRequest {
  pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPromotionsQuery {
  #[serde(default)]
  pub include_inactive: bool,
}

/// Request to open tracking for a package
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StartTrackingRequest {
  /// Custom stage names; configured defaults are used when absent
  #[validate(length(min = 1, message = "At least one stage is required"))]
  pub stages: Option<Vec<String>>,
}

/// Request to move a package along its stages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvanceTrackingRequest {
  /// Zero-based target stage; one step forward when absent
  pub target_index: Option<usize>,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn quote_request() -> QuoteRequest {
    QuoteRequest {
      weight_kg: dec!(5),
      length_cm: dec!(30),
      width_cm: dec!(20),
      height_cm: dec!(20),
      service_mode: "air".to_string(),
      membership_tier: None,
      promotion_code: None,
    }
  }

  #[test]
  fn test_quote_request_validation_valid() {
    assert!(quote_request().validate().is_ok());
  }

  #[test]
  fn test_quote_request_rejects_non_positive_measurements() {
    let request = QuoteRequest {
      weight_kg: dec!(0),
      ..quote_request()
    };
    assert!(request.validate().is_err());

    let request = QuoteRequest {
      height_cm: dec!(-1),
      ..quote_request()
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_quote_request_rejects_oversized_package() {
    let request = QuoteRequest {
      length_cm: dec!(1000000000000),
      width_cm: dec!(1000000000000),
      height_cm: dec!(1000000000000),
      ..quote_request()
    };
    let errors = request.validate().unwrap_err();
    assert_eq!(errors.field_errors().len(), 3);

    let request = QuoteRequest {
      weight_kg: dec!(250000),
      ..quote_request()
    };
    assert!(request.validate().is_err());

    let request = QuoteRequest {
      weight_kg: dec!(0.00004),
      ..quote_request()
    };
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_create_promotion_request_validation() {
    let json = r#"{
      "code": "SUMMER10",
      "discount_type": "percentage",
      "discount_value": "10",
      "valid_from": "2025-06-01",
      "valid_to": "2025-08-31",
      "usage_limit": 0
    }"#;
    let request: CreatePromotionRequest = serde_json::from_str(json).unwrap();
    assert!(request.validate().is_err());

    let request = CreatePromotionRequest {
      usage_limit: Some(100),
      weight_min: Some(dec!(1)),
      ..request
    };
    assert!(request.validate().is_ok());

    let request = CreatePromotionRequest {
      weight_max: Some(dec!(-2)),
      ..request
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_start_tracking_request_defaults() {
    let request: StartTrackingRequest = serde_json::from_str("{}").unwrap();
    assert!(request.stages.is_none());
    assert!(request.validate().is_ok());

    let request = StartTrackingRequest {
      stages: Some(Vec::new()),
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_list_promotions_query_default() {
    let query: ListPromotionsQuery = serde_json::from_str("{}").unwrap();
    assert!(!query.include_inactive);
  }
}

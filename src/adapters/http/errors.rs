use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::promotion::{DenialReason, PromotionError};
use crate::domain::shipping::ShippingError;
use crate::domain::tracking::TrackingError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Resource does not exist (404 Not Found)
  NotFound(String),

  /// Resource already exists or is in a conflicting state (409 Conflict)
  Conflict(String),

  /// Promotion cannot be applied (422 Unprocessable Entity)
  PromotionNotApplicable(DenialReason),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::PromotionNotApplicable(reason) => {
        write!(f, "Promotion not applicable: {}", reason)
      }
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::PromotionNotApplicable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
      ApiError::Conflict(msg) => ("conflict", msg.clone(), None),
      ApiError::PromotionNotApplicable(reason) => (
        "promotion_not_applicable",
        reason.message().to_string(),
        Some(serde_json::json!({ "reason": reason.as_str() })),
      ),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}

impl From<PromotionError> for ApiError {
  fn from(error: PromotionError) -> Self {
    match error {
      PromotionError::Validation(e) => ApiError::Validation(e.to_string()),
      PromotionError::PromotionNotFound(_) | PromotionError::CodeNotFound(_) => {
        ApiError::NotFound(error.to_string())
      }
      PromotionError::CodeAlreadyExists(_) => ApiError::Conflict(error.to_string()),
      PromotionError::NotEligible(reason) => ApiError::PromotionNotApplicable(reason),
      PromotionError::Repository(e) => ApiError::Internal(format!("Repository error: {}", e)),
      PromotionError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
      PromotionError::Internal(e) => ApiError::Internal(e),
    }
  }
}

impl From<ShippingError> for ApiError {
  fn from(error: ShippingError) -> Self {
    match error {
      ShippingError::Validation(e) => ApiError::Validation(e.to_string()),
      ShippingError::Promotion(e) => ApiError::from(e),
      ShippingError::QuoteNotFound(_) => ApiError::NotFound(error.to_string()),
      ShippingError::QuoteAlreadyConfirmed(_) => ApiError::Conflict(error.to_string()),
      ShippingError::ReferenceDataMissing(e) => {
        ApiError::Internal(format!("Reference data missing: {}", e))
      }
      ShippingError::Repository(e) => ApiError::Internal(format!("Repository error: {}", e)),
      ShippingError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
      ShippingError::Internal(e) => ApiError::Internal(e),
    }
  }
}

impl From<TrackingError> for ApiError {
  fn from(error: TrackingError) -> Self {
    match error {
      TrackingError::Validation(e) => ApiError::Validation(e.to_string()),
      TrackingError::StageIndexOutOfRange { .. } | TrackingError::AlreadyDelivered(_) => {
        ApiError::Validation(error.to_string())
      }
      TrackingError::TrackingNotFound(_) => ApiError::NotFound(error.to_string()),
      TrackingError::TrackingAlreadyExists(_) => ApiError::Conflict(error.to_string()),
      TrackingError::Repository(e) => ApiError::Internal(format!("Repository error: {}", e)),
      TrackingError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
      TrackingError::Internal(e) => ApiError::Internal(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Conflict("test".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::PromotionNotApplicable(DenialReason::UsageLimitReached).status_code(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_domain_error_conversion() {
    let api_error: ApiError = ShippingError::QuoteNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = ShippingError::QuoteAlreadyConfirmed(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError =
      ShippingError::Promotion(PromotionError::CodeNotFound("NOPE".to_string())).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = TrackingError::AlreadyDelivered(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = TrackingError::StageIndexOutOfRange {
      index: 9,
      stage_count: 3,
    }
    .into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn test_internal_error_hides_details() {
    let response = ApiError::Internal("connection refused".to_string()).error_response();
    let body = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["error"], "internal_error");
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
  }

  #[actix_web::test]
  async fn test_not_applicable_carries_reason() {
    let response = ApiError::PromotionNotApplicable(DenialReason::UsageLimitReached).error_response();
    let body = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["error"], "promotion_not_applicable");
    assert_eq!(body["details"]["reason"], "usage_limit_reached");
  }
}

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{dtos::QuoteRequest, errors::ApiError},
  application::quote::*,
};

/// Price a shipment
/// POST /api/v1/quotes
pub async fn create_quote_handler(
  request: web::Json<QuoteRequest>,
  use_case: web::Data<Arc<QuoteShipmentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = QuoteShipmentCommand {
    weight_kg: request.weight_kg,
    length_cm: request.length_cm,
    width_cm: request.width_cm,
    height_cm: request.height_cm,
    service_mode: request.service_mode,
    membership_tier: request.membership_tier,
    promotion_code: request.promotion_code,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(response))
}

/// Get a stored quote
/// GET /api/v1/quotes/:quote_id
pub async fn get_quote_handler(
  quote_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetQuoteCommand {
    quote_id: quote_id.into_inner(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Confirm a quote, redeeming its promotion
/// POST /api/v1/quotes/:quote_id/confirm
pub async fn confirm_quote_handler(
  quote_id: web::Path<Uuid>,
  use_case: web::Data<Arc<ConfirmQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ConfirmQuoteCommand {
    quote_id: quote_id.into_inner(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

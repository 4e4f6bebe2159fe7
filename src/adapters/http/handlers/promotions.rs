use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{
      CreatePromotionRequest, EvaluatePromotionRequest, ListPromotionsQuery,
      SetPromotionActiveRequest,
    },
    errors::ApiError,
  },
  application::promotion::*,
};

/// Create a promotion
/// POST /api/v1/promotions
pub async fn create_promotion_handler(
  request: web::Json<CreatePromotionRequest>,
  use_case: web::Data<Arc<CreatePromotionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = CreatePromotionCommand {
    code: request.code,
    description: request.description,
    discount_type: request.discount_type,
    discount_value: request.discount_value,
    service_modes: request.service_modes,
    weight_min: request.weight_min,
    weight_max: request.weight_max,
    required_membership_tiers: request.required_membership_tiers,
    valid_from: request.valid_from,
    valid_to: request.valid_to,
    usage_limit: request.usage_limit,
  };

  let promotion = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(promotion))
}

/// List promotions
/// GET /api/v1/promotions?include_inactive=true
pub async fn list_promotions_handler(
  query: web::Query<ListPromotionsQuery>,
  use_case: web::Data<Arc<ListPromotionsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ListPromotionsCommand {
    include_inactive: query.include_inactive,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Check whether a code applies to a shipment, without redeeming it
/// POST /api/v1/promotions/:code/evaluate
pub async fn evaluate_promotion_handler(
  code: web::Path<String>,
  request: web::Json<EvaluatePromotionRequest>,
  use_case: web::Data<Arc<EvaluatePromotionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = EvaluatePromotionCommand {
    code: code.into_inner(),
    service_mode: request.service_mode,
    weight_kg: request.weight_kg,
    membership_tier: request.membership_tier,
    evaluation_date: request.evaluation_date,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Activate or deactivate a promotion
/// PUT /api/v1/promotions/:promotion_id/active
pub async fn set_promotion_active_handler(
  promotion_id: web::Path<Uuid>,
  request: web::Json<SetPromotionActiveRequest>,
  use_case: web::Data<Arc<SetPromotionActiveUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = SetPromotionActiveCommand {
    promotion_id: promotion_id.into_inner(),
    active: request.active,
  };

  let promotion = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(promotion))
}

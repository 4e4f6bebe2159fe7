use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{AdvanceTrackingRequest, StartTrackingRequest},
    errors::ApiError,
  },
  application::tracking::*,
};

/// Open tracking for a package
/// POST /api/v1/packages/:package_id/tracking
pub async fn start_tracking_handler(
  package_id: web::Path<Uuid>,
  request: Option<web::Json<StartTrackingRequest>>,
  use_case: web::Data<Arc<StartTrackingUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.map(web::Json::into_inner).unwrap_or_default();
  request.validate()?;

  let command = StartTrackingCommand {
    package_id: package_id.into_inner(),
    stages: request.stages,
  };

  let tracking = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(tracking))
}

/// Get a package's stages
/// GET /api/v1/packages/:package_id/tracking
pub async fn get_tracking_handler(
  package_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetTrackingUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetTrackingCommand {
    package_id: package_id.into_inner(),
  };

  let tracking = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(tracking))
}

/// Move a package to a stage, or one step forward with an empty body
/// POST /api/v1/packages/:package_id/tracking/advance
pub async fn advance_tracking_handler(
  package_id: web::Path<Uuid>,
  request: Option<web::Json<AdvanceTrackingRequest>>,
  use_case: web::Data<Arc<AdvanceTrackingUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.map(web::Json::into_inner).unwrap_or_default();

  let command = AdvanceTrackingCommand {
    package_id: package_id.into_inner(),
    target_index: request.target_index,
  };

  let tracking = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(tracking))
}

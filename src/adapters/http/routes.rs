use actix_web::web;
use std::sync::Arc;

use crate::application::promotion::{
  CreatePromotionUseCase, EvaluatePromotionUseCase, ListPromotionsUseCase,
  SetPromotionActiveUseCase,
};
use crate::application::quote::{ConfirmQuoteUseCase, GetQuoteUseCase, QuoteShipmentUseCase};
use crate::application::tracking::{
  AdvanceTrackingUseCase, GetTrackingUseCase, StartTrackingUseCase,
};

use super::handlers::promotions::{
  create_promotion_handler, evaluate_promotion_handler, list_promotions_handler,
  set_promotion_active_handler,
};
use super::handlers::quotes::{confirm_quote_handler, create_quote_handler, get_quote_handler};
use super::handlers::tracking::{
  advance_tracking_handler, get_tracking_handler, start_tracking_handler,
};

/// Configure quote routes
///
/// Mounts the quoting endpoints under the provided scope (e.g. /api/v1/quotes).
///
/// # Routes
///
/// - POST / - Price a shipment and store the quote
/// - GET /{quote_id} - Get a stored quote
/// - POST /{quote_id}/confirm - Confirm a quote and redeem its promotion
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use parcelhub::application::quote::*;
/// # use parcelhub::adapters::http::routes::configure_quote_routes;
///
/// # async fn example(
/// #   quote_use_case: Arc<QuoteShipmentUseCase>,
/// #   get_use_case: Arc<GetQuoteUseCase>,
/// #   confirm_use_case: Arc<ConfirmQuoteUseCase>,
/// # ) {
/// let app = App::new().service(web::scope("/api/v1/quotes").configure(|cfg| {
///   configure_quote_routes(cfg, quote_use_case, get_use_case, confirm_use_case)
/// }));
/// # }
/// ```
pub fn configure_quote_routes(
  cfg: &mut web::ServiceConfig,
  quote_use_case: Arc<QuoteShipmentUseCase>,
  get_use_case: Arc<GetQuoteUseCase>,
  confirm_use_case: Arc<ConfirmQuoteUseCase>,
) {
  cfg
    .app_data(web::Data::new(quote_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(confirm_use_case))
    .route("", web::post().to(create_quote_handler))
    .route("/{quote_id}", web::get().to(get_quote_handler))
    .route("/{quote_id}/confirm", web::post().to(confirm_quote_handler));
}

/// Configure promotion routes
///
/// # Routes
///
/// - POST / - Create a promotion
/// - GET / - List promotions (`?include_inactive=true` to include disabled ones)
/// - POST /{code}/evaluate - Check a code against a shipment
/// - PUT /{promotion_id}/active - Enable or disable a promotion
pub fn configure_promotion_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreatePromotionUseCase>,
  list_use_case: Arc<ListPromotionsUseCase>,
  evaluate_use_case: Arc<EvaluatePromotionUseCase>,
  set_active_use_case: Arc<SetPromotionActiveUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(evaluate_use_case))
    .app_data(web::Data::new(set_active_use_case))
    .route("", web::post().to(create_promotion_handler))
    .route("", web::get().to(list_promotions_handler))
    .route("/{code}/evaluate", web::post().to(evaluate_promotion_handler))
    .route(
      "/{promotion_id}/active",
      web::put().to(set_promotion_active_handler),
    );
}

/// Configure package tracking routes, mounted under /api/v1/packages
///
/// # Routes
///
/// - POST /{package_id}/tracking - Open tracking with default or custom stages
/// - GET /{package_id}/tracking - Get the stage sequence
/// - POST /{package_id}/tracking/advance - Move to a stage (or one step forward)
pub fn configure_tracking_routes(
  cfg: &mut web::ServiceConfig,
  start_use_case: Arc<StartTrackingUseCase>,
  get_use_case: Arc<GetTrackingUseCase>,
  advance_use_case: Arc<AdvanceTrackingUseCase>,
) {
  cfg
    .app_data(web::Data::new(start_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(advance_use_case))
    .route("/{package_id}/tracking", web::post().to(start_tracking_handler))
    .route("/{package_id}/tracking", web::get().to(get_tracking_handler))
    .route(
      "/{package_id}/tracking/advance",
      web::post().to(advance_tracking_handler),
    );
}

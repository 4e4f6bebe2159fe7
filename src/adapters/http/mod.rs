pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  AdvanceTrackingRequest, CreatePromotionRequest, ErrorResponse, EvaluatePromotionRequest,
  QuoteRequest, StartTrackingRequest,
};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{configure_promotion_routes, configure_quote_routes, configure_tracking_routes};

pub mod engine;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use engine::{Eligibility, EvaluationContext, evaluate};
pub use entities::{Promotion, PromotionCondition};
pub use errors::PromotionError;
pub use ports::PromotionRepository;
pub use services::{NewPromotionData, PromotionService};
pub use value_objects::{
  DenialReason, DiscountValue, MembershipTier, PromotionCode, ValueObjectError,
};

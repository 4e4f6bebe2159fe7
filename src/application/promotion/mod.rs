pub mod create_promotion;
pub mod evaluate_promotion;
pub mod list_promotions;
pub mod set_promotion_active;

pub use create_promotion::{CreatePromotionCommand, CreatePromotionUseCase, PromotionDto};
pub use evaluate_promotion::{
  EligibilityDto, EvaluatePromotionCommand, EvaluatePromotionResponse, EvaluatePromotionUseCase,
};
pub use list_promotions::{ListPromotionsCommand, ListPromotionsResponse, ListPromotionsUseCase};
pub use set_promotion_active::{SetPromotionActiveCommand, SetPromotionActiveUseCase};

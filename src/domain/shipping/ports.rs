use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entities::Quote;
use super::errors::ShippingError;
use super::value_objects::{ConversionFactors, UnitRates};

/// Operator-tunable pricing tables.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
  async fn conversion_factors(&self) -> Result<ConversionFactors, ShippingError>;
  async fn unit_rates(&self) -> Result<UnitRates, ShippingError>;
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
  async fn create(&self, quote: Quote) -> Result<Quote, ShippingError>;
  /// Sets `confirmed_at` only if the quote is still unconfirmed. `None` when
  /// the quote is missing or another caller confirmed it first.
  async fn confirm_if_pending(
    &self,
    id: Uuid,
    confirmed_at: DateTime<Utc>,
  ) -> Result<Option<Quote>, ShippingError>;
  /// Clears a confirmation taken by `confirm_if_pending`.
  async fn revert_confirmation(&self, id: Uuid) -> Result<(), ShippingError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, ShippingError>;
}

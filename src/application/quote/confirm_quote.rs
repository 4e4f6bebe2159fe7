use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::shipping::{QuoteService, ShippingError};

use super::get_quote::QuoteDetailsResponse;

#[derive(Debug, Deserialize)]
pub struct ConfirmQuoteCommand {
  pub quote_id: Uuid,
}

pub struct ConfirmQuoteUseCase {
  quote_service: Arc<QuoteService>,
}

impl ConfirmQuoteUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(
    &self,
    command: ConfirmQuoteCommand,
  ) -> Result<QuoteDetailsResponse, ShippingError> {
    let quote = self
      .quote_service
      .confirm_quote(command.quote_id, Utc::now())
      .await?;
    Ok(QuoteDetailsResponse::from(&quote))
  }
}

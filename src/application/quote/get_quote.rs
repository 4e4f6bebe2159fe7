use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::shipping::{Quote, QuoteService, ShippingError};

#[derive(Debug, Deserialize)]
pub struct GetQuoteCommand {
  pub quote_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BillableWeightDto {
  pub real_weight_kg: Decimal,
  pub volumetric_weight_kg: Decimal,
  pub billable_weight_kg: Decimal,
}

#[derive(Debug, Serialize)]
pub struct InvoiceLineDto {
  pub key: String,
  pub value: String,
  pub amount: Decimal,
  pub priority: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteDetailsResponse {
  pub quote_id: Uuid,
  pub service_mode: String,
  pub membership_tier: String,
  pub promotion_code: Option<String>,
  pub billable_weight: BillableWeightDto,
  pub lines: Vec<InvoiceLineDto>,
  pub total: Decimal,
  pub currency: String,
  pub created_at: DateTime<Utc>,
  pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<&Quote> for QuoteDetailsResponse {
  fn from(quote: &Quote) -> Self {
    let weight = quote.invoice.billable_weight();
    Self {
      quote_id: quote.id,
      service_mode: quote.shipment.service_mode().as_str().to_string(),
      membership_tier: quote.membership_tier.as_str().to_string(),
      promotion_code: quote.promotion_code.clone(),
      billable_weight: BillableWeightDto {
        real_weight_kg: weight.real_weight_kg,
        volumetric_weight_kg: weight.volumetric_weight_kg,
        billable_weight_kg: weight.billable_weight_kg,
      },
      lines: quote
        .invoice
        .lines()
        .iter()
        .map(|line| InvoiceLineDto {
          key: line.key.clone(),
          value: line.value.clone(),
          amount: line.amount,
          priority: line.priority.as_str().to_string(),
        })
        .collect(),
      total: quote.invoice.total(),
      currency: quote.invoice.currency().as_str().to_string(),
      created_at: quote.created_at,
      confirmed_at: quote.confirmed_at,
    }
  }
}

pub struct GetQuoteUseCase {
  quote_service: Arc<QuoteService>,
}

impl GetQuoteUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(
    &self,
    command: GetQuoteCommand,
  ) -> Result<QuoteDetailsResponse, ShippingError> {
    let quote = self.quote_service.get_quote(command.quote_id).await?;
    Ok(QuoteDetailsResponse::from(&quote))
  }
}

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::promotion::EligibilityDto;
use crate::domain::promotion::{MembershipTier, PromotionError};
use crate::domain::shipping::{QuoteData, QuoteService, ServiceMode, ShipmentRequest, ShippingError};

use super::get_quote::QuoteDetailsResponse;

#[derive(Debug, Deserialize)]
pub struct QuoteShipmentCommand {
  pub weight_kg: Decimal,
  pub length_cm: Decimal,
  pub width_cm: Decimal,
  pub height_cm: Decimal,
  pub service_mode: String,
  pub membership_tier: Option<String>,
  pub promotion_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteShipmentResponse {
  pub quote: QuoteDetailsResponse,
  pub promotion: Option<EligibilityDto>,
}

pub struct QuoteShipmentUseCase {
  quote_service: Arc<QuoteService>,
}

impl QuoteShipmentUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(
    &self,
    command: QuoteShipmentCommand,
  ) -> Result<QuoteShipmentResponse, ShippingError> {
    let service_mode = ServiceMode::from_str(&command.service_mode)?;
    let shipment = ShipmentRequest::new(
      command.weight_kg,
      command.length_cm,
      command.width_cm,
      command.height_cm,
      service_mode,
    )?;
    let membership_tier = match command.membership_tier.as_deref() {
      Some(tier) => MembershipTier::from_str(tier).map_err(PromotionError::from)?,
      None => MembershipTier::default(),
    };
    let promotion_code = command
      .promotion_code
      .filter(|code| !code.trim().is_empty());

    let data = QuoteData {
      shipment,
      membership_tier,
      promotion_code,
    };

    let (quote, eligibility) = self.quote_service.quote_shipment(data, Utc::now()).await?;

    Ok(QuoteShipmentResponse {
      quote: QuoteDetailsResponse::from(&quote),
      promotion: eligibility.as_ref().map(EligibilityDto::from),
    })
  }
}

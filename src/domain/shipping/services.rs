use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::promotion::{Eligibility, EvaluationContext, MembershipTier, PromotionService};

use super::entities::{Quote, ShipmentRequest};
use super::errors::ShippingError;
use super::invoice::{AppliedDiscount, build_invoice};
use super::ports::{QuoteRepository, ReferenceDataRepository};
use super::tariff::compute_base_fare;
use super::value_objects::{Currency, PercentageRate};
use super::weight::compute_billable_weight;

/// Global pricing configuration applied to every quote
#[derive(Debug, Clone, Copy)]
pub struct PricingSettings {
  pub currency: Currency,
  pub tax_rate: PercentageRate,
  pub fuel_surcharge_rate: PercentageRate,
}

/// Quote request data
pub struct QuoteData {
  pub shipment: ShipmentRequest,
  pub membership_tier: MembershipTier,
  pub promotion_code: Option<String>,
}

pub struct QuoteService {
  quote_repo: Arc<dyn QuoteRepository>,
  reference_data: Arc<dyn ReferenceDataRepository>,
  promotion_service: Arc<PromotionService>,
  pricing: PricingSettings,
}

impl QuoteService {
  pub fn new(
    quote_repo: Arc<dyn QuoteRepository>,
    reference_data: Arc<dyn ReferenceDataRepository>,
    promotion_service: Arc<PromotionService>,
    pricing: PricingSettings,
  ) -> Self {
    Self {
      quote_repo,
      reference_data,
      promotion_service,
      pricing,
    }
  }

  /// Prices a shipment. A promotion code that does not apply still yields a
  /// quote, without a discount line; the eligibility decision is returned
  /// alongside so the caller can explain why.
  pub async fn quote_shipment(
    &self,
    data: QuoteData,
    now: DateTime<Utc>,
  ) -> Result<(Quote, Option<Eligibility>), ShippingError> {
    let factors = self.reference_data.conversion_factors().await?;
    let unit_rates = self.reference_data.unit_rates().await?;

    let service_mode = data.shipment.service_mode();
    let billable_weight = compute_billable_weight(&data.shipment, &factors)?;
    let base_fare = compute_base_fare(
      billable_weight.billable_weight_kg,
      service_mode,
      &unit_rates,
    )?;

    let mut eligibility = None;
    let mut applied = None;
    if let Some(code) = data.promotion_code.as_deref() {
      let context = EvaluationContext {
        service_mode,
        weight_kg: billable_weight.billable_weight_kg,
        membership_tier: data.membership_tier,
        evaluation_date: now.date_naive(),
      };
      let (promotion, decision) = self.promotion_service.evaluate_code(code, &context).await?;
      if decision.eligible {
        applied = Some((
          promotion.id,
          AppliedDiscount {
            code: promotion.code.value().to_string(),
            amount: decision.discount_amount(base_fare),
          },
        ));
      }
      eligibility = Some(decision);
    }

    let invoice = build_invoice(
      billable_weight,
      base_fare,
      self.pricing.tax_rate,
      self.pricing.fuel_surcharge_rate,
      applied.as_ref().map(|(_, discount)| discount),
      self.pricing.currency,
    )?;

    tracing::debug!(
      service_mode = %service_mode,
      billable_weight_kg = %billable_weight.billable_weight_kg,
      base_fare = %base_fare,
      total = %invoice.total(),
      "Shipment priced"
    );

    let quote = Quote::new(
      data.shipment,
      data.membership_tier,
      applied.map(|(id, discount)| (id, discount.code)),
      invoice,
      now,
    );
    let created = self.quote_repo.create(quote).await?;

    Ok((created, eligibility))
  }

  pub async fn get_quote(&self, quote_id: Uuid) -> Result<Quote, ShippingError> {
    self
      .quote_repo
      .find_by_id(quote_id)
      .await?
      .ok_or(ShippingError::QuoteNotFound(quote_id))
  }

  /// Confirms a quote and counts its promotion redemption.
  ///
  /// The confirmation is claimed in storage first, so concurrent requests for
  /// the same quote redeem at most once. If the redemption is refused the
  /// claim is released and the quote stays unconfirmed.
  pub async fn confirm_quote(
    &self,
    quote_id: Uuid,
    now: DateTime<Utc>,
  ) -> Result<Quote, ShippingError> {
    let confirmed = match self.quote_repo.confirm_if_pending(quote_id, now).await? {
      Some(quote) => quote,
      None => {
        let quote = self.get_quote(quote_id).await?;
        return Err(ShippingError::QuoteAlreadyConfirmed(quote.id));
      }
    };

    if let Some(promotion_id) = confirmed.promotion_id {
      if let Err(error) = self.promotion_service.redeem(promotion_id).await {
        if let Err(revert_error) = self.quote_repo.revert_confirmation(quote_id).await {
          tracing::error!(
            %quote_id,
            %promotion_id,
            error = %revert_error,
            "Failed to release quote confirmation after a refused redemption"
          );
        }
        return Err(error.into());
      }
    }

    tracing::info!(
      quote_id = %confirmed.id,
      promotion = ?confirmed.promotion_code,
      total = %confirmed.invoice.total(),
      "Quote confirmed"
    );
    Ok(confirmed)
  }
}

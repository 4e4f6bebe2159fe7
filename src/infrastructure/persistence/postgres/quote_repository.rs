use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::promotion::MembershipTier;
use crate::domain::shipping::{
  Invoice, Quote, QuoteRepository, ServiceMode, ShipmentRequest, ShippingError,
};

#[derive(Debug, FromRow)]
struct QuoteRow {
  id: Uuid,
  service_mode: String,
  weight_kg: Decimal,
  length_cm: Decimal,
  width_cm: Decimal,
  height_cm: Decimal,
  membership_tier: String,
  promotion_id: Option<Uuid>,
  promotion_code: Option<String>,
  invoice: JsonValue,
  created_at: DateTime<Utc>,
  confirmed_at: Option<DateTime<Utc>>,
}

impl TryFrom<QuoteRow> for Quote {
  type Error = ShippingError;

  fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
    let shipment = ShipmentRequest::new(
      row.weight_kg,
      row.length_cm,
      row.width_cm,
      row.height_cm,
      ServiceMode::from_str(&row.service_mode)?,
    )?;
    let membership_tier = MembershipTier::from_str(&row.membership_tier)
      .map_err(|e| ShippingError::Internal(format!("Failed to parse membership tier: {}", e)))?;
    let invoice = serde_json::from_value::<Invoice>(row.invoice)
      .map_err(|e| ShippingError::Internal(format!("Failed to parse invoice: {}", e)))?;

    Ok(Quote {
      id: row.id,
      shipment,
      membership_tier,
      promotion_id: row.promotion_id,
      promotion_code: row.promotion_code,
      invoice,
      created_at: row.created_at,
      confirmed_at: row.confirmed_at,
    })
  }
}

pub struct PostgresQuoteRepository {
  pool: PgPool,
}

impl PostgresQuoteRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
  async fn create(&self, quote: Quote) -> Result<Quote, ShippingError> {
    let invoice_json = serde_json::to_value(&quote.invoice)
      .map_err(|e| ShippingError::Internal(format!("Failed to serialize invoice: {}", e)))?;

    let row = sqlx::query_as::<_, QuoteRow>(
      r#"
            INSERT INTO quotes (
                id, service_mode, weight_kg, length_cm, width_cm, height_cm, membership_tier,
                promotion_id, promotion_code, invoice, total, currency, created_at, confirmed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, service_mode, weight_kg, length_cm, width_cm, height_cm, membership_tier,
                      promotion_id, promotion_code, invoice, created_at, confirmed_at
            "#,
    )
    .bind(quote.id)
    .bind(quote.shipment.service_mode().as_str())
    .bind(quote.shipment.weight_kg())
    .bind(quote.shipment.length_cm())
    .bind(quote.shipment.width_cm())
    .bind(quote.shipment.height_cm())
    .bind(quote.membership_tier.as_str())
    .bind(quote.promotion_id)
    .bind(&quote.promotion_code)
    .bind(invoice_json)
    .bind(quote.invoice.total())
    .bind(quote.invoice.currency().as_str())
    .bind(quote.created_at)
    .bind(quote.confirmed_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn confirm_if_pending(
    &self,
    id: Uuid,
    confirmed_at: DateTime<Utc>,
  ) -> Result<Option<Quote>, ShippingError> {
    // Pricing is immutable once quoted; only confirmation changes
    let row = sqlx::query_as::<_, QuoteRow>(
      r#"
            UPDATE quotes
            SET confirmed_at = $2
            WHERE id = $1 AND confirmed_at IS NULL
            RETURNING id, service_mode, weight_kg, length_cm, width_cm, height_cm, membership_tier,
                      promotion_id, promotion_code, invoice, created_at, confirmed_at
            "#,
    )
    .bind(id)
    .bind(confirmed_at)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn revert_confirmation(&self, id: Uuid) -> Result<(), ShippingError> {
    sqlx::query(
      r#"
            UPDATE quotes
            SET confirmed_at = NULL
            WHERE id = $1
            "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, ShippingError> {
    let row = sqlx::query_as::<_, QuoteRow>(
      r#"
            SELECT id, service_mode, weight_kg, length_cm, width_cm, height_cm, membership_tier,
                   promotion_id, promotion_code, invoice, created_at, confirmed_at
            FROM quotes
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::shipping::{
    ConversionFactors, Currency, PercentageRate, UnitRates, build_invoice, compute_base_fare,
    compute_billable_weight,
  };
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use rust_decimal_macros::dec;

  fn quote() -> Quote {
    let shipment =
      ShipmentRequest::new(dec!(5), dec!(30), dec!(20), dec!(20), ServiceMode::Air).unwrap();
    let weight = compute_billable_weight(&shipment, &ConversionFactors::default()).unwrap();
    let base =
      compute_base_fare(weight.billable_weight_kg, ServiceMode::Air, &UnitRates::default()).unwrap();
    let invoice = build_invoice(
      weight,
      base,
      PercentageRate::new(dec!(16)).unwrap(),
      PercentageRate::new(dec!(4)).unwrap(),
      None,
      Currency::USD,
    )
    .unwrap();
    Quote::new(shipment, MembershipTier::Silver, None, invoice, Utc::now())
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_create_find_and_confirm() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresQuoteRepository::new(pool);

    let created = repo.create(quote()).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.invoice, created.invoice);
    assert_eq!(found.membership_tier, MembershipTier::Silver);
    assert!(!found.is_confirmed());

    let confirmed = repo
      .confirm_if_pending(created.id, Utc::now())
      .await
      .unwrap()
      .unwrap();
    assert!(confirmed.is_confirmed());
    assert!(
      repo
        .confirm_if_pending(created.id, Utc::now())
        .await
        .unwrap()
        .is_none()
    );

    repo.revert_confirmation(created.id).await.unwrap();
    let reverted = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(!reverted.is_confirmed());
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_concurrent_confirmations_claim_once() {
    let (pool, _container) = setup_test_db().await;
    let repo = std::sync::Arc::new(PostgresQuoteRepository::new(pool));
    let created = repo.create(quote()).await.unwrap();

    let handles: Vec<_> = (0..16)
      .map(|_| {
        let repo = repo.clone();
        tokio::spawn(async move {
          repo
            .confirm_if_pending(created.id, Utc::now())
            .await
            .unwrap()
            .is_some()
        })
      })
      .collect();

    let mut claimed = 0;
    for handle in handles {
      if handle.await.unwrap() {
        claimed += 1;
      }
    }
    assert_eq!(claimed, 1);
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_measurements_round_trip_exactly() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresQuoteRepository::new(pool);

    let shipment =
      ShipmentRequest::new(dec!(0.00004), dec!(0.5), dec!(0.25), dec!(0.125), ServiceMode::Sea)
        .unwrap();
    let weight = compute_billable_weight(&shipment, &ConversionFactors::default()).unwrap();
    let base =
      compute_base_fare(weight.billable_weight_kg, ServiceMode::Sea, &UnitRates::default()).unwrap();
    let invoice = build_invoice(
      weight,
      base,
      PercentageRate::new(dec!(16)).unwrap(),
      PercentageRate::zero(),
      None,
      Currency::USD,
    )
    .unwrap();
    let quote = Quote::new(shipment, MembershipTier::Standard, None, invoice, Utc::now());

    let created = repo.create(quote.clone()).await.unwrap();
    assert_eq!(created.shipment.weight_kg(), dec!(0.00004));

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.shipment, quote.shipment);
    assert_eq!(found.invoice.total(), quote.invoice.total());
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_find_missing_quote() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresQuoteRepository::new(pool);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }
}

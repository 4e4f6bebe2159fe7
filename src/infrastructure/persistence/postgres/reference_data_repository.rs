use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::shipping::{
  ConversionFactors, ReferenceDataRepository, ServiceMode, ShippingError, UnitRates,
};

#[derive(Debug, FromRow)]
struct ServiceRateRow {
  service_mode: String,
  volumetric_divisor: Decimal,
  rate_per_kg: Decimal,
}

pub struct PostgresReferenceDataRepository {
  pool: PgPool,
}

impl PostgresReferenceDataRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn load_rates(&self) -> Result<HashMap<ServiceMode, ServiceRateRow>, ShippingError> {
    let rows = sqlx::query_as::<_, ServiceRateRow>(
      r#"
            SELECT service_mode, volumetric_divisor, rate_per_kg
            FROM service_rates
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows
      .into_iter()
      .map(|row| -> Result<_, ShippingError> {
        Ok((ServiceMode::from_str(&row.service_mode)?, row))
      })
      .collect()
  }

  fn pick<'a>(
    rates: &'a HashMap<ServiceMode, ServiceRateRow>,
    mode: ServiceMode,
  ) -> Result<&'a ServiceRateRow, ShippingError> {
    rates.get(&mode).ok_or_else(|| {
      ShippingError::ReferenceDataMissing(format!("No service rate configured for {}", mode))
    })
  }
}

#[async_trait]
impl ReferenceDataRepository for PostgresReferenceDataRepository {
  async fn conversion_factors(&self) -> Result<ConversionFactors, ShippingError> {
    let rates = self.load_rates().await?;
    Ok(ConversionFactors::new(
      Self::pick(&rates, ServiceMode::Air)?.volumetric_divisor,
      Self::pick(&rates, ServiceMode::Ground)?.volumetric_divisor,
      Self::pick(&rates, ServiceMode::Sea)?.volumetric_divisor,
    )?)
  }

  async fn unit_rates(&self) -> Result<UnitRates, ShippingError> {
    let rates = self.load_rates().await?;
    Ok(UnitRates::new(
      Self::pick(&rates, ServiceMode::Air)?.rate_per_kg,
      Self::pick(&rates, ServiceMode::Ground)?.rate_per_kg,
      Self::pick(&rates, ServiceMode::Sea)?.rate_per_kg,
    )?)
  }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::BTreeSet;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::promotion::{
  DiscountValue, MembershipTier, Promotion, PromotionCode, PromotionCondition, PromotionError,
  PromotionRepository,
};
use crate::domain::shipping::ServiceMode;

const PROMOTION_COLUMNS: &str = "id, code, description, active, discount_type, discount_value, \
  service_modes, weight_min, weight_max, required_membership_tiers, valid_from, valid_to, \
  usage_limit, usage_count, created_at, updated_at";

#[derive(Debug, FromRow)]
struct PromotionRow {
  id: Uuid,
  code: String,
  description: Option<String>,
  active: bool,
  discount_type: String,
  discount_value: Decimal,
  service_modes: Option<Vec<String>>,
  weight_min: Option<Decimal>,
  weight_max: Option<Decimal>,
  required_membership_tiers: Option<Vec<String>>,
  valid_from: NaiveDate,
  valid_to: NaiveDate,
  usage_limit: Option<i32>,
  usage_count: i32,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

fn stored_count(value: i32, column: &str) -> Result<u32, PromotionError> {
  u32::try_from(value)
    .map_err(|_| PromotionError::Internal(format!("Negative {} in promotions table", column)))
}

impl TryFrom<PromotionRow> for Promotion {
  type Error = PromotionError;

  fn try_from(row: PromotionRow) -> Result<Self, Self::Error> {
    let service_modes = row
      .service_modes
      .map(|modes| {
        modes
          .iter()
          .map(|mode| ServiceMode::from_str(mode))
          .collect::<Result<BTreeSet<_>, _>>()
      })
      .transpose()
      .map_err(|e| PromotionError::Internal(format!("Failed to parse service modes: {}", e)))?;

    let required_membership_tiers = row
      .required_membership_tiers
      .map(|tiers| {
        tiers
          .iter()
          .map(|tier| MembershipTier::from_str(tier))
          .collect::<Result<BTreeSet<_>, _>>()
      })
      .transpose()?;

    // Stored conditions are loaded as-is; inconsistent bounds are the engine's concern
    let condition = PromotionCondition {
      service_modes,
      weight_min: row.weight_min,
      weight_max: row.weight_max,
      required_membership_tiers,
      valid_from: row.valid_from,
      valid_to: row.valid_to,
      usage_limit: row
        .usage_limit
        .map(|limit| stored_count(limit, "usage_limit"))
        .transpose()?,
      usage_count: stored_count(row.usage_count, "usage_count")?,
    };

    Ok(Promotion {
      id: row.id,
      code: PromotionCode::new(row.code)?,
      description: row.description,
      active: row.active,
      discount: DiscountValue::from_parts(&row.discount_type, row.discount_value)?,
      condition,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn mode_names(modes: &Option<BTreeSet<ServiceMode>>) -> Option<Vec<String>> {
  modes
    .as_ref()
    .map(|modes| modes.iter().map(|m| m.as_str().to_string()).collect())
}

fn tier_names(tiers: &Option<BTreeSet<MembershipTier>>) -> Option<Vec<String>> {
  tiers
    .as_ref()
    .map(|tiers| tiers.iter().map(|t| t.as_str().to_string()).collect())
}

fn count_param(value: u32) -> Result<i32, PromotionError> {
  i32::try_from(value).map_err(|_| PromotionError::Internal(format!("Count {} out of range", value)))
}

pub struct PostgresPromotionRepository {
  pool: PgPool,
}

impl PostgresPromotionRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PromotionRepository for PostgresPromotionRepository {
  async fn create(&self, promotion: Promotion) -> Result<Promotion, PromotionError> {
    let usage_limit = promotion
      .condition
      .usage_limit
      .map(count_param)
      .transpose()?;

    let result = sqlx::query_as::<_, PromotionRow>(&format!(
      r#"
            INSERT INTO promotions (
                id, code, description, active, discount_type, discount_value,
                service_modes, weight_min, weight_max, required_membership_tiers,
                valid_from, valid_to, usage_limit, usage_count, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
      PROMOTION_COLUMNS
    ))
    .bind(promotion.id)
    .bind(promotion.code.value())
    .bind(&promotion.description)
    .bind(promotion.active)
    .bind(promotion.discount.kind())
    .bind(promotion.discount.value())
    .bind(mode_names(&promotion.condition.service_modes))
    .bind(promotion.condition.weight_min)
    .bind(promotion.condition.weight_max)
    .bind(tier_names(&promotion.condition.required_membership_tiers))
    .bind(promotion.condition.valid_from)
    .bind(promotion.condition.valid_to)
    .bind(usage_limit)
    .bind(count_param(promotion.condition.usage_count)?)
    .bind(promotion.created_at)
    .bind(promotion.updated_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => row.try_into(),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
        PromotionError::CodeAlreadyExists(promotion.code.into_inner()),
      ),
      Err(e) => Err(e.into()),
    }
  }

  async fn update(&self, promotion: Promotion) -> Result<Promotion, PromotionError> {
    let usage_limit = promotion
      .condition
      .usage_limit
      .map(count_param)
      .transpose()?;

    // usage_count is owned by increment_usage and never written here
    let row = sqlx::query_as::<_, PromotionRow>(&format!(
      r#"
            UPDATE promotions
            SET description = $2, active = $3, discount_type = $4, discount_value = $5,
                service_modes = $6, weight_min = $7, weight_max = $8,
                required_membership_tiers = $9, valid_from = $10, valid_to = $11,
                usage_limit = $12, updated_at = $13
            WHERE id = $1
            RETURNING {}
            "#,
      PROMOTION_COLUMNS
    ))
    .bind(promotion.id)
    .bind(&promotion.description)
    .bind(promotion.active)
    .bind(promotion.discount.kind())
    .bind(promotion.discount.value())
    .bind(mode_names(&promotion.condition.service_modes))
    .bind(promotion.condition.weight_min)
    .bind(promotion.condition.weight_max)
    .bind(tier_names(&promotion.condition.required_membership_tiers))
    .bind(promotion.condition.valid_from)
    .bind(promotion.condition.valid_to)
    .bind(usage_limit)
    .bind(promotion.updated_at)
    .fetch_optional(&self.pool)
    .await?;

    row
      .ok_or(PromotionError::PromotionNotFound(promotion.id))?
      .try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Promotion>, PromotionError> {
    let row = sqlx::query_as::<_, PromotionRow>(&format!(
      "SELECT {} FROM promotions WHERE id = $1",
      PROMOTION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>, PromotionError> {
    let row = sqlx::query_as::<_, PromotionRow>(&format!(
      "SELECT {} FROM promotions WHERE code = $1",
      PROMOTION_COLUMNS
    ))
    .bind(code)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self, include_inactive: bool) -> Result<Vec<Promotion>, PromotionError> {
    let rows = sqlx::query_as::<_, PromotionRow>(&format!(
      "SELECT {} FROM promotions WHERE ($1 OR active) ORDER BY created_at DESC, code ASC",
      PROMOTION_COLUMNS
    ))
    .bind(include_inactive)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn increment_usage(&self, id: Uuid) -> Result<Option<Promotion>, PromotionError> {
    // Single conditional UPDATE so concurrent confirmations cannot overshoot the cap
    let row = sqlx::query_as::<_, PromotionRow>(&format!(
      r#"
            UPDATE promotions
            SET usage_count = usage_count + 1, updated_at = NOW()
            WHERE id = $1 AND (usage_limit IS NULL OR usage_count < usage_limit)
            RETURNING {}
            "#,
      PROMOTION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use rust_decimal_macros::dec;

  fn promotion(code: &str, usage_limit: Option<u32>) -> Promotion {
    let condition = PromotionCondition {
      service_modes: Some(BTreeSet::from([ServiceMode::Air])),
      weight_min: Some(dec!(1)),
      required_membership_tiers: Some(BTreeSet::from([MembershipTier::Gold])),
      usage_limit,
      ..PromotionCondition::between(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
      )
    };
    Promotion::new(
      PromotionCode::new(code.to_string()).unwrap(),
      Some("Test promotion".to_string()),
      DiscountValue::percentage(dec!(10)).unwrap(),
      condition,
      Utc::now(),
    )
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_create_and_find_by_code() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresPromotionRepository::new(pool);

    let created = repo.create(promotion("SUMMER10", Some(5))).await.unwrap();
    let found = repo.find_by_code("SUMMER10").await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.condition, created.condition);
    assert_eq!(found.discount, DiscountValue::Percentage(dec!(10)));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_duplicate_code() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresPromotionRepository::new(pool);

    repo.create(promotion("DUPLICATE", None)).await.unwrap();
    let result = repo.create(promotion("DUPLICATE", None)).await;

    assert!(matches!(result, Err(PromotionError::CodeAlreadyExists(_))));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_increment_usage_respects_limit() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresPromotionRepository::new(pool);

    let created = repo.create(promotion("TWICE", Some(2))).await.unwrap();

    let first = repo.increment_usage(created.id).await.unwrap().unwrap();
    assert_eq!(first.condition.usage_count, 1);
    let second = repo.increment_usage(created.id).await.unwrap().unwrap();
    assert_eq!(second.condition.usage_count, 2);
    assert!(repo.increment_usage(created.id).await.unwrap().is_none());

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.condition.usage_count, 2);
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_list_filters_inactive() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresPromotionRepository::new(pool);

    repo.create(promotion("ACTIVE1", None)).await.unwrap();
    let mut inactive = repo.create(promotion("INACTIVE1", None)).await.unwrap();
    inactive.set_active(false, Utc::now());
    repo.update(inactive).await.unwrap();

    assert_eq!(repo.list(false).await.unwrap().len(), 1);
    assert_eq!(repo.list(true).await.unwrap().len(), 2);
  }
}

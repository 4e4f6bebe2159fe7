use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::tracking::{PackageTracking, TrackingError, TrackingRepository, TrackingStage};

#[derive(Debug, FromRow)]
struct PackageTrackingRow {
  package_id: Uuid,
  stages: JsonValue,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<PackageTrackingRow> for PackageTracking {
  type Error = TrackingError;

  fn try_from(row: PackageTrackingRow) -> Result<Self, Self::Error> {
    let stages = serde_json::from_value::<Vec<TrackingStage>>(row.stages)
      .map_err(|e| TrackingError::Internal(format!("Failed to parse tracking stages: {}", e)))?;

    Ok(PackageTracking {
      package_id: row.package_id,
      stages,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn stages_json(tracking: &PackageTracking) -> Result<JsonValue, TrackingError> {
  serde_json::to_value(&tracking.stages)
    .map_err(|e| TrackingError::Internal(format!("Failed to serialize tracking stages: {}", e)))
}

pub struct PostgresTrackingRepository {
  pool: PgPool,
}

impl PostgresTrackingRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TrackingRepository for PostgresTrackingRepository {
  async fn create(&self, tracking: PackageTracking) -> Result<PackageTracking, TrackingError> {
    let result = sqlx::query_as::<_, PackageTrackingRow>(
      r#"
            INSERT INTO package_tracking (package_id, stages, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING package_id, stages, created_at, updated_at
            "#,
    )
    .bind(tracking.package_id)
    .bind(stages_json(&tracking)?)
    .bind(tracking.created_at)
    .bind(tracking.updated_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => row.try_into(),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
        Err(TrackingError::TrackingAlreadyExists(tracking.package_id))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn update(&self, tracking: PackageTracking) -> Result<PackageTracking, TrackingError> {
    let row = sqlx::query_as::<_, PackageTrackingRow>(
      r#"
            UPDATE package_tracking
            SET stages = $2, updated_at = $3
            WHERE package_id = $1
            RETURNING package_id, stages, created_at, updated_at
            "#,
    )
    .bind(tracking.package_id)
    .bind(stages_json(&tracking)?)
    .bind(tracking.updated_at)
    .fetch_optional(&self.pool)
    .await?;

    row
      .ok_or(TrackingError::TrackingNotFound(tracking.package_id))?
      .try_into()
  }

  async fn find_by_package_id(
    &self,
    package_id: Uuid,
  ) -> Result<Option<PackageTracking>, TrackingError> {
    let row = sqlx::query_as::<_, PackageTrackingRow>(
      r#"
            SELECT package_id, stages, created_at, updated_at
            FROM package_tracking
            WHERE package_id = $1
            "#,
    )
    .bind(package_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }
}

//! In-memory storage for development and tests
//!
//! Backed by `DashMap`. Read-modify-write operations hold the entry's shard
//! lock, so uniqueness checks and the promotion usage cap are atomic within
//! the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::domain::promotion::{Promotion, PromotionError, PromotionRepository};
use crate::domain::shipping::{
  ConversionFactors, Quote, QuoteRepository, ReferenceDataRepository, ShippingError, UnitRates,
};
use crate::domain::tracking::{PackageTracking, TrackingError, TrackingRepository};

/// Fixed reference data, the same defaults the database is seeded with
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceData {
  conversion_factors: ConversionFactors,
  unit_rates: UnitRates,
}

impl InMemoryReferenceData {
  pub fn new(conversion_factors: ConversionFactors, unit_rates: UnitRates) -> Self {
    Self {
      conversion_factors,
      unit_rates,
    }
  }
}

#[async_trait]
impl ReferenceDataRepository for InMemoryReferenceData {
  async fn conversion_factors(&self) -> Result<ConversionFactors, ShippingError> {
    Ok(self.conversion_factors)
  }

  async fn unit_rates(&self) -> Result<UnitRates, ShippingError> {
    Ok(self.unit_rates)
  }
}

#[derive(Default)]
pub struct InMemoryPromotionRepository {
  promotions: DashMap<Uuid, Promotion>,
  // code -> id
  codes: DashMap<String, Uuid>,
}

impl InMemoryPromotionRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl PromotionRepository for InMemoryPromotionRepository {
  async fn create(&self, promotion: Promotion) -> Result<Promotion, PromotionError> {
    match self.codes.entry(promotion.code.value().to_string()) {
      Entry::Occupied(entry) => Err(PromotionError::CodeAlreadyExists(entry.key().clone())),
      Entry::Vacant(entry) => {
        entry.insert(promotion.id);
        self.promotions.insert(promotion.id, promotion.clone());
        Ok(promotion)
      }
    }
  }

  async fn update(&self, promotion: Promotion) -> Result<Promotion, PromotionError> {
    let mut stored = self
      .promotions
      .get_mut(&promotion.id)
      .ok_or(PromotionError::PromotionNotFound(promotion.id))?;

    // usage_count is owned by increment_usage
    let usage_count = stored.condition.usage_count;
    *stored = promotion;
    stored.condition.usage_count = usage_count;
    Ok(stored.value().clone())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Promotion>, PromotionError> {
    Ok(self.promotions.get(&id).map(|p| p.value().clone()))
  }

  async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>, PromotionError> {
    let Some(id) = self.codes.get(code).map(|id| *id) else {
      return Ok(None);
    };
    self.find_by_id(id).await
  }

  async fn list(&self, include_inactive: bool) -> Result<Vec<Promotion>, PromotionError> {
    let mut promotions: Vec<Promotion> = self
      .promotions
      .iter()
      .filter(|p| include_inactive || p.active)
      .map(|p| p.value().clone())
      .collect();
    promotions.sort_by(|a, b| {
      b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.code.value().cmp(b.code.value()))
    });
    Ok(promotions)
  }

  async fn increment_usage(&self, id: Uuid) -> Result<Option<Promotion>, PromotionError> {
    let Some(mut promotion) = self.promotions.get_mut(&id) else {
      return Ok(None);
    };
    if promotion.condition.is_usage_exhausted() {
      return Ok(None);
    }
    promotion.condition.usage_count += 1;
    promotion.updated_at = Utc::now();
    Ok(Some(promotion.value().clone()))
  }
}

#[derive(Default)]
pub struct InMemoryQuoteRepository {
  quotes: DashMap<Uuid, Quote>,
}

impl InMemoryQuoteRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
  async fn create(&self, quote: Quote) -> Result<Quote, ShippingError> {
    match self.quotes.entry(quote.id) {
      Entry::Occupied(_) => Err(ShippingError::Repository(format!(
        "Quote {} already exists",
        quote.id
      ))),
      Entry::Vacant(entry) => {
        entry.insert(quote.clone());
        Ok(quote)
      }
    }
  }

  async fn confirm_if_pending(
    &self,
    id: Uuid,
    confirmed_at: DateTime<Utc>,
  ) -> Result<Option<Quote>, ShippingError> {
    let mut stored = match self.quotes.get_mut(&id) {
      Some(stored) => stored,
      None => return Ok(None),
    };
    if stored.is_confirmed() {
      return Ok(None);
    }
    stored.confirm(confirmed_at);
    Ok(Some(stored.value().clone()))
  }

  async fn revert_confirmation(&self, id: Uuid) -> Result<(), ShippingError> {
    if let Some(mut stored) = self.quotes.get_mut(&id) {
      stored.confirmed_at = None;
    }
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, ShippingError> {
    Ok(self.quotes.get(&id).map(|q| q.value().clone()))
  }
}

#[derive(Default)]
pub struct InMemoryTrackingRepository {
  trackings: DashMap<Uuid, PackageTracking>,
}

impl InMemoryTrackingRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl TrackingRepository for InMemoryTrackingRepository {
  async fn create(&self, tracking: PackageTracking) -> Result<PackageTracking, TrackingError> {
    match self.trackings.entry(tracking.package_id) {
      Entry::Occupied(_) => Err(TrackingError::TrackingAlreadyExists(tracking.package_id)),
      Entry::Vacant(entry) => {
        entry.insert(tracking.clone());
        Ok(tracking)
      }
    }
  }

  async fn update(&self, tracking: PackageTracking) -> Result<PackageTracking, TrackingError> {
    let mut stored = self
      .trackings
      .get_mut(&tracking.package_id)
      .ok_or(TrackingError::TrackingNotFound(tracking.package_id))?;
    *stored = tracking;
    Ok(stored.value().clone())
  }

  async fn find_by_package_id(
    &self,
    package_id: Uuid,
  ) -> Result<Option<PackageTracking>, TrackingError> {
    Ok(self.trackings.get(&package_id).map(|t| t.value().clone()))
  }
}

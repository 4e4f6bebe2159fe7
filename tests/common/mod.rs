#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;

use parcelhub::domain::promotion::{
  DiscountValue, NewPromotionData, PromotionCode, PromotionCondition, PromotionService,
};
use parcelhub::domain::shipping::{Currency, PercentageRate, PricingSettings, QuoteService};
use parcelhub::domain::tracking::{StageName, TrackingService};
use parcelhub::infrastructure::persistence::memory::{
  InMemoryPromotionRepository, InMemoryQuoteRepository, InMemoryReferenceData,
  InMemoryTrackingRepository,
};

pub struct TestServices {
  pub promotions: Arc<PromotionService>,
  pub quotes: Arc<QuoteService>,
  pub tracking: Arc<TrackingService>,
}

/// 16% tax, 4% fuel surcharge, USD
pub fn pricing() -> PricingSettings {
  PricingSettings {
    currency: Currency::USD,
    tax_rate: PercentageRate::new(dec!(16)).unwrap(),
    fuel_surcharge_rate: PercentageRate::new(dec!(4)).unwrap(),
  }
}

pub fn default_stages() -> Vec<StageName> {
  [
    "Received at locker",
    "Flight assigned",
    "Customs",
    "Distribution center",
    "Ready for delivery",
  ]
  .iter()
  .map(|name| StageName::new(name.to_string()).unwrap())
  .collect()
}

/// Services wired to fresh in-memory repositories and default reference data.
pub fn services() -> TestServices {
  let promotions = Arc::new(PromotionService::new(Arc::new(
    InMemoryPromotionRepository::new(),
  )));
  let quotes = Arc::new(QuoteService::new(
    Arc::new(InMemoryQuoteRepository::new()),
    Arc::new(InMemoryReferenceData::default()),
    promotions.clone(),
    pricing(),
  ));
  let tracking = Arc::new(TrackingService::new(
    Arc::new(InMemoryTrackingRepository::new()),
    default_stages(),
  ));

  TestServices {
    promotions,
    quotes,
    tracking,
  }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Promotion valid for all of 2025 with no other restriction.
pub fn promotion_2025(code: &str, discount: DiscountValue) -> NewPromotionData {
  NewPromotionData {
    code: PromotionCode::new(code.to_string()).unwrap(),
    description: None,
    discount,
    condition: PromotionCondition::between(date(2025, 1, 1), date(2025, 12, 31)),
  }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::promotion::MembershipTier;

use super::invoice::Invoice;
use super::value_objects::{ServiceMode, ValueObjectError};

/// Heaviest package accepted for quoting.
pub const MAX_WEIGHT_KG: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
/// Longest side accepted for quoting.
pub const MAX_DIMENSION_CM: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Package attributes for one quote request. All measurements are strictly
/// positive and bounded by [`MAX_WEIGHT_KG`] and [`MAX_DIMENSION_CM`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
  weight_kg: Decimal,
  length_cm: Decimal,
  width_cm: Decimal,
  height_cm: Decimal,
  service_mode: ServiceMode,
}

impl ShipmentRequest {
  pub fn new(
    weight_kg: Decimal,
    length_cm: Decimal,
    width_cm: Decimal,
    height_cm: Decimal,
    service_mode: ServiceMode,
  ) -> Result<Self, ValueObjectError> {
    if weight_kg <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidWeight(
        "Weight must be positive".to_string(),
      ));
    }
    if weight_kg > MAX_WEIGHT_KG {
      return Err(ValueObjectError::InvalidWeight(format!(
        "Weight cannot exceed {} kg",
        MAX_WEIGHT_KG
      )));
    }
    for (name, value) in [
      ("length", length_cm),
      ("width", width_cm),
      ("height", height_cm),
    ] {
      if value <= Decimal::ZERO {
        return Err(ValueObjectError::InvalidDimension(format!(
          "{} must be positive",
          name
        )));
      }
      if value > MAX_DIMENSION_CM {
        return Err(ValueObjectError::InvalidDimension(format!(
          "{} cannot exceed {} cm",
          name, MAX_DIMENSION_CM
        )));
      }
    }

    Ok(Self {
      weight_kg,
      length_cm,
      width_cm,
      height_cm,
      service_mode,
    })
  }

  pub fn weight_kg(&self) -> Decimal {
    self.weight_kg
  }

  pub fn length_cm(&self) -> Decimal {
    self.length_cm
  }

  pub fn width_cm(&self) -> Decimal {
    self.width_cm
  }

  pub fn height_cm(&self) -> Decimal {
    self.height_cm
  }

  pub fn service_mode(&self) -> ServiceMode {
    self.service_mode
  }

  pub fn volume_cm3(&self) -> Result<Decimal, ValueObjectError> {
    self
      .length_cm
      .checked_mul(self.width_cm)
      .and_then(|area| area.checked_mul(self.height_cm))
      .ok_or_else(|| ValueObjectError::AmountOutOfRange("Package volume is too large".to_string()))
  }
}

// Quote - a priced shipment, confirmed at most once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
  pub id: Uuid,
  pub shipment: ShipmentRequest,
  pub membership_tier: MembershipTier,
  pub promotion_id: Option<Uuid>,
  pub promotion_code: Option<String>,
  pub invoice: Invoice,
  pub created_at: DateTime<Utc>,
  pub confirmed_at: Option<DateTime<Utc>>,
}

impl Quote {
  pub fn new(
    shipment: ShipmentRequest,
    membership_tier: MembershipTier,
    applied_promotion: Option<(Uuid, String)>,
    invoice: Invoice,
    created_at: DateTime<Utc>,
  ) -> Self {
    let (promotion_id, promotion_code) = match applied_promotion {
      Some((id, code)) => (Some(id), Some(code)),
      None => (None, None),
    };

    Self {
      id: Uuid::new_v4(),
      shipment,
      membership_tier,
      promotion_id,
      promotion_code,
      invoice,
      created_at,
      confirmed_at: None,
    }
  }

  pub fn is_confirmed(&self) -> bool {
    self.confirmed_at.is_some()
  }

  pub fn confirm(&mut self, now: DateTime<Utc>) {
    self.confirmed_at = Some(now);
  }
}

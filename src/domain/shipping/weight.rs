use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entities::ShipmentRequest;
use super::value_objects::{ConversionFactors, ValueObjectError};

/// Real, volumetric and billable weight of a package, in kilograms.
///
/// Values are exact. Rounding happens only when an amount is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableWeight {
  pub real_weight_kg: Decimal,
  pub volumetric_weight_kg: Decimal,
  pub billable_weight_kg: Decimal,
}

/// Carriers bill on whichever of real and volumetric weight is larger.
pub fn compute_billable_weight(
  shipment: &ShipmentRequest,
  factors: &ConversionFactors,
) -> Result<BillableWeight, ValueObjectError> {
  let real_weight_kg = shipment.weight_kg();
  let volumetric_weight_kg = shipment
    .volume_cm3()?
    .checked_div(factors.divisor(shipment.service_mode()))
    .ok_or_else(|| {
      ValueObjectError::AmountOutOfRange("Volumetric weight is too large".to_string())
    })?;

  Ok(BillableWeight {
    real_weight_kg,
    volumetric_weight_kg,
    billable_weight_kg: real_weight_kg.max(volumetric_weight_kg),
  })
}

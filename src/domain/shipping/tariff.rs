use rust_decimal::Decimal;

use super::value_objects::{ServiceMode, UnitRates, ValueObjectError};

/// Base fare before tax, surcharge and discount.
pub fn compute_base_fare(
  billable_weight_kg: Decimal,
  service_mode: ServiceMode,
  unit_rates: &UnitRates,
) -> Result<Decimal, ValueObjectError> {
  billable_weight_kg
    .checked_mul(unit_rates.rate_per_kg(service_mode))
    .ok_or_else(|| ValueObjectError::AmountOutOfRange("Base fare is too large".to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_default_rates() {
    let rates = UnitRates::default();
    assert_eq!(compute_base_fare(dec!(5), ServiceMode::Air, &rates).unwrap(), dec!(125));
    assert_eq!(compute_base_fare(dec!(30), ServiceMode::Ground, &rates).unwrap(), dec!(450));
    assert_eq!(compute_base_fare(dec!(10), ServiceMode::Sea, &rates).unwrap(), dec!(80));
  }

  #[test]
  fn test_injected_rates() {
    let rates = UnitRates::new(dec!(31.5), dec!(12), dec!(7.25)).unwrap();
    assert_eq!(compute_base_fare(dec!(2), ServiceMode::Air, &rates).unwrap(), dec!(63.0));
    assert_eq!(compute_base_fare(dec!(4), ServiceMode::Sea, &rates).unwrap(), dec!(29.00));
  }

  #[test]
  fn test_fare_overflow_is_an_error() {
    let rates = UnitRates::new(dec!(10000000000000000000000000), dec!(15), dec!(8)).unwrap();
    assert!(matches!(
      compute_base_fare(dec!(100000), ServiceMode::Air, &rates),
      Err(ValueObjectError::AmountOutOfRange(_))
    ));
  }
}

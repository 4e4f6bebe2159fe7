use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid weight: {0}")]
  InvalidWeight(String),
  #[error("Invalid dimension: {0}")]
  InvalidDimension(String),
  #[error("Invalid service mode: {0}")]
  InvalidServiceMode(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid rate: {0}")]
  InvalidRate(String),
  #[error("Invalid volumetric divisor: {0}")]
  InvalidDivisor(String),
  #[error("Amount out of range: {0}")]
  AmountOutOfRange(String),
}

// Service Mode - transport channel of a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
  Air,
  Ground,
  Sea,
}

impl ServiceMode {
  pub const ALL: [ServiceMode; 3] = [ServiceMode::Air, ServiceMode::Ground, ServiceMode::Sea];

  pub fn as_str(&self) -> &'static str {
    match self {
      ServiceMode::Air => "air",
      ServiceMode::Ground => "ground",
      ServiceMode::Sea => "sea",
    }
  }
}

impl FromStr for ServiceMode {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "air" => Ok(ServiceMode::Air),
      "ground" => Ok(ServiceMode::Ground),
      "sea" => Ok(ServiceMode::Sea),
      _ => Err(ValueObjectError::InvalidServiceMode(format!(
        "Unknown service mode: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for ServiceMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Currency - ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
  USD,
  EUR,
  GBP,
  MXN,
}

impl Currency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Currency::USD => "USD",
      Currency::EUR => "EUR",
      Currency::GBP => "GBP",
      Currency::MXN => "MXN",
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Currency::USD => "$",
      Currency::EUR => "€",
      Currency::GBP => "£",
      Currency::MXN => "MX$",
    }
  }

  /// Formats an amount for display, rounded to cents.
  ///
  /// Negative amounts put the sign before the symbol: `-$12.50`.
  pub fn format(&self, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
      format!("-{}{:.2}", self.symbol(), rounded.abs())
    } else {
      format!("{}{:.2}", self.symbol(), rounded.abs())
    }
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "USD" => Ok(Currency::USD),
      "EUR" => Ok(Currency::EUR),
      "GBP" => Ok(Currency::GBP),
      "MXN" => Ok(Currency::MXN),
      _ => Err(ValueObjectError::InvalidCurrency(format!(
        "Unsupported currency: {}",
        s
      ))),
    }
  }
}

// Percentage Rate - tax and fuel surcharge, expressed in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageRate(Decimal);

impl PercentageRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
      return Err(ValueObjectError::InvalidRate(
        "Rate must be between 0 and 100".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::ONE_HUNDRED
  }
}

/// Volumetric divisor per service mode (cm³ per kg).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionFactors {
  air: Decimal,
  ground: Decimal,
  sea: Decimal,
}

impl ConversionFactors {
  pub fn new(air: Decimal, ground: Decimal, sea: Decimal) -> Result<Self, ValueObjectError> {
    for (mode, divisor) in [
      (ServiceMode::Air, air),
      (ServiceMode::Ground, ground),
      (ServiceMode::Sea, sea),
    ] {
      if divisor <= Decimal::ZERO {
        return Err(ValueObjectError::InvalidDivisor(format!(
          "Divisor for {} must be positive",
          mode
        )));
      }
    }
    Ok(Self { air, ground, sea })
  }

  pub fn divisor(&self, mode: ServiceMode) -> Decimal {
    match mode {
      ServiceMode::Air => self.air,
      ServiceMode::Ground => self.ground,
      ServiceMode::Sea => self.sea,
    }
  }
}

impl Default for ConversionFactors {
  fn default() -> Self {
    Self {
      air: Decimal::from(6000),
      ground: Decimal::from(4000),
      sea: Decimal::from(4000),
    }
  }
}

/// Price per billable kilogram per service mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRates {
  air: Decimal,
  ground: Decimal,
  sea: Decimal,
}

impl UnitRates {
  pub fn new(air: Decimal, ground: Decimal, sea: Decimal) -> Result<Self, ValueObjectError> {
    for (mode, rate) in [
      (ServiceMode::Air, air),
      (ServiceMode::Ground, ground),
      (ServiceMode::Sea, sea),
    ] {
      if rate.is_sign_negative() {
        return Err(ValueObjectError::InvalidRate(format!(
          "Unit rate for {} cannot be negative",
          mode
        )));
      }
    }
    Ok(Self { air, ground, sea })
  }

  pub fn rate_per_kg(&self, mode: ServiceMode) -> Decimal {
    match mode {
      ServiceMode::Air => self.air,
      ServiceMode::Ground => self.ground,
      ServiceMode::Sea => self.sea,
    }
  }
}

impl Default for UnitRates {
  fn default() -> Self {
    Self {
      air: Decimal::from(25),
      ground: Decimal::from(15),
      sea: Decimal::from(8),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_service_mode() {
    assert_eq!(ServiceMode::from_str("AIR").unwrap(), ServiceMode::Air);
    assert_eq!(ServiceMode::from_str(" ground ").unwrap(), ServiceMode::Ground);
    assert_eq!(ServiceMode::Sea.to_string(), "sea");
    assert!(ServiceMode::from_str("rail").is_err());
  }

  #[test]
  fn test_currency_format() {
    assert_eq!(Currency::USD.format(dec!(125)), "$125.00");
    assert_eq!(Currency::USD.format(dec!(-12.5)), "-$12.50");
    assert_eq!(Currency::EUR.format(dec!(0.004)), "€0.00");
    assert_eq!(Currency::USD.format(dec!(10.125)), "$10.13");
    assert!(Currency::from_str("JPY").is_err());
  }

  #[test]
  fn test_percentage_rate() {
    assert!(PercentageRate::new(dec!(16)).is_ok());
    assert!(PercentageRate::new(dec!(0)).is_ok());
    assert!(PercentageRate::new(dec!(100)).is_ok());
    assert!(PercentageRate::new(dec!(-1)).is_err());
    assert!(PercentageRate::new(dec!(100.5)).is_err());
    assert_eq!(
      PercentageRate::new(dec!(16)).unwrap().as_multiplier(),
      dec!(0.16)
    );
  }

  #[test]
  fn test_conversion_factor_defaults() {
    let factors = ConversionFactors::default();
    assert_eq!(factors.divisor(ServiceMode::Air), dec!(6000));
    assert_eq!(factors.divisor(ServiceMode::Ground), dec!(4000));
    assert_eq!(factors.divisor(ServiceMode::Sea), dec!(4000));
  }

  #[test]
  fn test_conversion_factors_reject_non_positive_divisor() {
    assert!(ConversionFactors::new(dec!(5000), dec!(0), dec!(4000)).is_err());
    assert!(ConversionFactors::new(dec!(5000), dec!(4000), dec!(-1)).is_err());
    assert_eq!(
      ConversionFactors::new(dec!(5000), dec!(4000), dec!(3000))
        .unwrap()
        .divisor(ServiceMode::Air),
      dec!(5000)
    );
  }

  #[test]
  fn test_unit_rates() {
    let rates = UnitRates::default();
    assert_eq!(rates.rate_per_kg(ServiceMode::Air), dec!(25));
    assert_eq!(rates.rate_per_kg(ServiceMode::Ground), dec!(15));
    assert_eq!(rates.rate_per_kg(ServiceMode::Sea), dec!(8));
    assert!(UnitRates::new(dec!(1), dec!(-2), dec!(3)).is_err());
  }
}

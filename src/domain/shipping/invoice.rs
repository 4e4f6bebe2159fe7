use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{Currency, PercentageRate, ValueObjectError};
use super::weight::BillableWeight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePriority {
  Normal,
  Emphasized,
  Promotional,
}

impl LinePriority {
  pub fn as_str(&self) -> &'static str {
    match self {
      LinePriority::Normal => "normal",
      LinePriority::Emphasized => "emphasized",
      LinePriority::Promotional => "promotional",
    }
  }
}

// Invoice Line - one labeled row of a quote, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
  pub key: String,
  pub value: String,
  pub amount: Decimal,
  pub priority: LinePriority,
}

impl InvoiceLine {
  fn new(key: String, amount: Decimal, priority: LinePriority, currency: Currency) -> Self {
    Self {
      key,
      value: currency.format(amount),
      amount,
      priority,
    }
  }
}

/// Discount granted by a promotion, already resolved to an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
  pub code: String,
  pub amount: Decimal,
}

/// Priced breakdown of a quote. Built once by [`build_invoice`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
  billable_weight: BillableWeight,
  currency: Currency,
  lines: Vec<InvoiceLine>,
  total: Decimal,
}

impl Invoice {
  pub fn billable_weight(&self) -> &BillableWeight {
    &self.billable_weight
  }

  pub fn currency(&self) -> Currency {
    self.currency
  }

  pub fn lines(&self) -> &[InvoiceLine] {
    &self.lines
  }

  pub fn total(&self) -> Decimal {
    self.total
  }

  /// The grand total is the last emphasized line.
  pub fn grand_total_line(&self) -> Option<&InvoiceLine> {
    self
      .lines
      .iter()
      .rev()
      .find(|line| line.priority == LinePriority::Emphasized)
  }

  pub fn discount_line(&self) -> Option<&InvoiceLine> {
    self
      .lines
      .iter()
      .find(|line| line.priority == LinePriority::Promotional)
  }
}

/// Composes the invoice lines in their fixed order:
/// base fare, tax, fuel surcharge, discount (only when one applies), total.
pub fn build_invoice(
  billable_weight: BillableWeight,
  base_fare: Decimal,
  tax_rate: PercentageRate,
  fuel_surcharge_rate: PercentageRate,
  discount: Option<&AppliedDiscount>,
  currency: Currency,
) -> Result<Invoice, ValueObjectError> {
  // Rates are at most 100%, so neither product exceeds the base fare
  let tax = base_fare * tax_rate.as_multiplier();
  let fuel_surcharge = base_fare * fuel_surcharge_rate.as_multiplier();

  let mut lines = Vec::with_capacity(5);
  lines.push(InvoiceLine::new(
    "Base fare".to_string(),
    base_fare,
    LinePriority::Normal,
    currency,
  ));
  lines.push(InvoiceLine::new(
    format!("Tax ({}%)", tax_rate.value().normalize()),
    tax,
    LinePriority::Normal,
    currency,
  ));
  lines.push(InvoiceLine::new(
    format!("Fuel surcharge ({}%)", fuel_surcharge_rate.value().normalize()),
    fuel_surcharge,
    LinePriority::Normal,
    currency,
  ));

  let mut discount_amount = Decimal::ZERO;
  if let Some(discount) = discount.filter(|d| d.amount > Decimal::ZERO) {
    discount_amount = discount.amount;
    lines.push(InvoiceLine::new(
      format!("Discount ({})", discount.code),
      -discount_amount,
      LinePriority::Promotional,
      currency,
    ));
  }

  let total = base_fare
    .checked_add(tax)
    .and_then(|sum| sum.checked_add(fuel_surcharge))
    .and_then(|sum| sum.checked_sub(discount_amount))
    .ok_or_else(|| ValueObjectError::AmountOutOfRange("Invoice total is too large".to_string()))?;
  lines.push(InvoiceLine::new(
    "Total".to_string(),
    total,
    LinePriority::Emphasized,
    currency,
  ));

  Ok(Invoice {
    billable_weight,
    currency,
    lines,
    total,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn weight(kg: Decimal) -> BillableWeight {
    BillableWeight {
      real_weight_kg: kg,
      volumetric_weight_kg: Decimal::ZERO,
      billable_weight_kg: kg,
    }
  }

  fn rate(value: Decimal) -> PercentageRate {
    PercentageRate::new(value).unwrap()
  }

  #[test]
  fn test_invoice_without_discount() {
    let invoice = build_invoice(
      weight(dec!(5)),
      dec!(125),
      rate(dec!(16)),
      rate(dec!(4)),
      None,
      Currency::USD,
    )
    .unwrap();

    let keys: Vec<&str> = invoice.lines().iter().map(|l| l.key.as_str()).collect();
    assert_eq!(
      keys,
      vec!["Base fare", "Tax (16%)", "Fuel surcharge (4%)", "Total"]
    );
    assert_eq!(invoice.lines()[1].amount, dec!(20)); // 125 * 0.16
    assert_eq!(invoice.lines()[2].amount, dec!(5)); // 125 * 0.04
    assert_eq!(invoice.total(), dec!(150));
    assert_eq!(invoice.grand_total_line().unwrap().value, "$150.00");
    assert!(invoice.discount_line().is_none());
  }

  #[test]
  fn test_invoice_with_discount() {
    let discount = AppliedDiscount {
      code: "SUMMER10".to_string(),
      amount: dec!(12.5),
    };
    let invoice = build_invoice(
      weight(dec!(5)),
      dec!(125),
      rate(dec!(16)),
      rate(dec!(4)),
      Some(&discount),
      Currency::USD,
    )
    .unwrap();

    assert_eq!(invoice.lines().len(), 5);
    let discount_line = &invoice.lines()[3];
    assert_eq!(discount_line.key, "Discount (SUMMER10)");
    assert_eq!(discount_line.priority, LinePriority::Promotional);
    assert_eq!(discount_line.amount, dec!(-12.5));
    assert_eq!(discount_line.value, "-$12.50");
    assert_eq!(invoice.total(), dec!(137.5));
    assert_eq!(invoice.lines().last().unwrap().priority, LinePriority::Emphasized);
  }

  #[test]
  fn test_zero_discount_is_omitted() {
    let discount = AppliedDiscount {
      code: "NOTHING".to_string(),
      amount: Decimal::ZERO,
    };
    let invoice = build_invoice(
      weight(dec!(1)),
      dec!(8),
      rate(dec!(0)),
      rate(dec!(0)),
      Some(&discount),
      Currency::EUR,
    )
    .unwrap();
    assert!(invoice.discount_line().is_none());
    assert_eq!(invoice.lines().len(), 4);
    assert_eq!(invoice.total(), dec!(8));
  }

  #[test]
  fn test_total_overflow_is_an_error() {
    let huge = Decimal::MAX / dec!(2);
    let result = build_invoice(
      weight(dec!(1)),
      huge,
      rate(dec!(100)),
      rate(dec!(100)),
      None,
      Currency::USD,
    );
    assert!(matches!(result, Err(ValueObjectError::AmountOutOfRange(_))));
  }

  #[test]
  fn test_single_emphasized_line_and_total_matches_lines() {
    let fares = [dec!(0.01), dec!(17.33), dec!(450), dec!(1234.567)];
    let discounts = [None, Some(dec!(0.01)), Some(dec!(10))];

    for fare in fares {
      for discount_amount in discounts {
        let discount = discount_amount.map(|amount| AppliedDiscount {
          code: "X".to_string(),
          amount: amount.min(fare),
        });
        let invoice = build_invoice(
          weight(dec!(1)),
          fare,
          rate(dec!(16)),
          rate(dec!(3.5)),
          discount.as_ref(),
          Currency::USD,
        )
        .unwrap();

        let emphasized = invoice
          .lines()
          .iter()
          .filter(|l| l.priority == LinePriority::Emphasized)
          .count();
        assert_eq!(emphasized, 1);

        let line_sum: Decimal = invoice
          .lines()
          .iter()
          .filter(|l| l.priority != LinePriority::Emphasized)
          .map(|l| l.amount)
          .sum();
        assert_eq!(line_sum, invoice.total());
        assert_eq!(invoice.grand_total_line().unwrap().amount, invoice.total());
      }
    }
  }
}

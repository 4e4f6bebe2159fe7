pub mod entities;
pub mod errors;
pub mod invoice;
pub mod ports;
pub mod services;
pub mod tariff;
pub mod value_objects;
pub mod weight;

pub use entities::{MAX_DIMENSION_CM, MAX_WEIGHT_KG, Quote, ShipmentRequest};
pub use errors::ShippingError;
pub use invoice::{AppliedDiscount, Invoice, InvoiceLine, LinePriority, build_invoice};
pub use ports::{QuoteRepository, ReferenceDataRepository};
pub use services::{PricingSettings, QuoteData, QuoteService};
pub use tariff::compute_base_fare;
pub use value_objects::{
  ConversionFactors, Currency, PercentageRate, ServiceMode, UnitRates, ValueObjectError,
};
pub use weight::{BillableWeight, compute_billable_weight};

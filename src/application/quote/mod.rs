pub mod confirm_quote;
pub mod get_quote;
pub mod quote_shipment;

pub use confirm_quote::{ConfirmQuoteCommand, ConfirmQuoteUseCase};
pub use get_quote::{
  BillableWeightDto, GetQuoteCommand, GetQuoteUseCase, InvoiceLineDto, QuoteDetailsResponse,
};
pub use quote_shipment::{QuoteShipmentCommand, QuoteShipmentResponse, QuoteShipmentUseCase};

//! # Authnet Types
//!
//! Domain types and port traits for the Authorize.Net gateway adapter.
//! This crate has no IO dependencies: only data structures, validation
//! rules, and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - request document model (Money, Card, Transaction, envelope)
//! - `ports/` - the transport trait adapters must implement
//! - `dto/` - caller-facing request parameters
//! - `error/` - domain, transport and gateway error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Card, CreateTransactionRequest, Currency, DeviceType, MarketType, MerchantAuthentication,
    Money, Payment, Transaction, TransactionType,
};
pub use dto::{AmountInput, AuthorizeParams, Item};
pub use error::{DomainError, GatewayError, TransportError};
pub use ports::GatewayTransport;

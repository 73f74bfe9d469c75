//! # Authnet Hex
//!
//! Application service layer for the Authorize.Net gateway adapter.
//!
//! ## Architecture
//!
//! - `builder` - assembles a transaction from caller parameters
//! - `service` - application service (build, wrap in credentials, send)
//! - `response` - read-only view over the decoded gateway response
//!
//! The service is generic over `T: GatewayTransport`, allowing
//! different transports to be injected.

pub mod builder;
pub mod response;
pub mod service;


pub use builder::TransactionBuilder;
pub use response::{AuthorizeResponse, ResponseCode};
pub use service::GatewayService;

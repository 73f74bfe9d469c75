//! Gateway transport port.
//!
//! Adapters (the reqwest client, in-memory fakes) implement this trait.

use crate::domain::CreateTransactionRequest;
use crate::error::TransportError;

/// Delivers a transaction request to the gateway and returns its decoded body.
///
/// Implementations POST the JSON-encoded request once, with no retry, to the
/// sandbox endpoint when `test_mode` is set and to the live one otherwise.
/// A body that cannot be decoded as JSON yields `Ok(None)`; HTTP status
/// codes are not interpreted.
#[async_trait::async_trait]
pub trait GatewayTransport: Send + Sync + 'static {
    async fn send(
        &self,
        request: &CreateTransactionRequest,
        test_mode: bool,
    ) -> Result<Option<serde_json::Value>, TransportError>;
}

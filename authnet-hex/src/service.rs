//! Gateway Application Service
//!
//! Builds transactions, wraps them in merchant credentials and hands them to
//! the transport port. Contains NO infrastructure logic.

use tracing::info;

use authnet_types::{
    AuthorizeParams, CreateTransactionRequest, GatewayError, GatewayTransport, Transaction,
    TransactionType,
};

use crate::builder::TransactionBuilder;
use crate::response::AuthorizeResponse;

/// Application service for gateway operations.
///
/// Generic over `T: GatewayTransport` - the adapter is injected at compile time,
/// so tests can drive the service with an in-memory transport.
pub struct GatewayService<T: GatewayTransport> {
    transport: T,
}

impl<T: GatewayTransport> GatewayService<T> {
    /// Creates a new gateway service with the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Build
    // ─────────────────────────────────────────────────────────────────────────────

    /// Builds an authorize-only transaction without sending it.
    pub fn build_authorize(&self, params: &AuthorizeParams) -> Result<Transaction, GatewayError> {
        Ok(TransactionBuilder::authorize(params).build()?)
    }

    /// Builds an authorize-and-capture transaction without sending it.
    pub fn build_purchase(&self, params: &AuthorizeParams) -> Result<Transaction, GatewayError> {
        Ok(TransactionBuilder::purchase(params).build()?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Send
    // ─────────────────────────────────────────────────────────────────────────────

    /// Authorizes funds on the card without capturing them.
    pub async fn authorize(
        &self,
        params: &AuthorizeParams,
    ) -> Result<AuthorizeResponse, GatewayError> {
        let transaction = self.build_authorize(params)?;
        self.send(params, transaction).await
    }

    /// Authorizes and captures funds in one step.
    pub async fn purchase(&self, params: &AuthorizeParams) -> Result<AuthorizeResponse, GatewayError> {
        let transaction = self.build_purchase(params)?;
        self.send(params, transaction).await
    }

    /// Wraps an already built transaction in the merchant credentials from
    /// `params` and sends it.
    pub async fn send(
        &self,
        params: &AuthorizeParams,
        transaction: Transaction,
    ) -> Result<AuthorizeResponse, GatewayError> {
        let credentials = params.merchant_authentication()?;
        let request = CreateTransactionRequest::new(credentials, transaction);
        let tx = request.transaction();

        info!(
            transaction_type = %tx.transaction_type(),
            amount = %tx.amount(),
            payment = %tx.payment().map(|p| p.describe()).unwrap_or_else(|| "none".into()),
            test_mode = params.test_mode,
            "Sending transaction"
        );

        let data = self.transport.send(&request, params.test_mode).await?;
        let response = AuthorizeResponse::new(data);

        info!(
            result_code = response.result_code().unwrap_or("-"),
            transaction_id = response.transaction_id().unwrap_or("-"),
            approved = response.is_successful(),
            "Received gateway response"
        );

        Ok(response)
    }

    /// Shorthand used by callers that pick the transaction type at runtime.
    pub async fn execute(
        &self,
        transaction_type: TransactionType,
        params: &AuthorizeParams,
    ) -> Result<AuthorizeResponse, GatewayError> {
        match transaction_type {
            TransactionType::AuthOnly => self.authorize(params).await,
            TransactionType::AuthCapture => self.purchase(params).await,
        }
    }
}

//! Error types for the gateway adapter.

use crate::domain::Currency;

/// Domain-level errors (validation and money rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid card: {0}")]
    InvalidCard(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Transport-level errors raised by a [`GatewayTransport`](crate::ports::GatewayTransport).
///
/// HTTP status codes are not interpreted, so there is no status variant:
/// a non-2xx response still yields a (possibly empty) decoded body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by the gateway service to its callers.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts_into_gateway_error() {
        let err: GatewayError = DomainError::InvalidCard("Card has expired".into()).into();
        assert_eq!(err.to_string(), "Invalid card: Card has expired");
    }

    #[test]
    fn test_currency_mismatch_message() {
        let err = DomainError::CurrencyMismatch {
            expected: Currency::USD,
            got: Currency::EUR,
        };
        assert_eq!(err.to_string(), "Currency mismatch: expected USD, got EUR");
    }
}

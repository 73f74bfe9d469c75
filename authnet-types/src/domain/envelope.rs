//! Authenticated request envelope sent to the gateway.

use serde::Serialize;
use std::fmt;

use super::transaction::Transaction;

/// Merchant API credentials.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuthentication {
    name: String,
    transaction_key: String,
}

impl MerchantAuthentication {
    pub fn new(name: impl Into<String>, transaction_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transaction_key: transaction_key.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for MerchantAuthentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantAuthentication")
            .field("name", &self.name)
            .field("transaction_key", &"***")
            .finish()
    }
}

/// A `createTransactionRequest` document: credentials plus one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransactionRequest {
    merchant_authentication: MerchantAuthentication,
    transaction_request: Transaction,
}

impl CreateTransactionRequest {
    pub fn new(merchant_authentication: MerchantAuthentication, transaction: Transaction) -> Self {
        Self {
            merchant_authentication,
            transaction_request: transaction,
        }
    }

    pub fn merchant_authentication(&self) -> &MerchantAuthentication {
        &self.merchant_authentication
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction_request
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeBody<'a> {
    merchant_authentication: &'a MerchantAuthentication,
    transaction_request: &'a Transaction,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    create_transaction_request: EnvelopeBody<'a>,
}

impl Serialize for CreateTransactionRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            create_transaction_request: EnvelopeBody {
                merchant_authentication: &self.merchant_authentication,
                transaction_request: &self.transaction_request,
            },
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, Money, TransactionType};
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let tx = Transaction::new(TransactionType::AuthOnly, Money::new(1000, Currency::USD).unwrap());
        let request = CreateTransactionRequest::new(MerchantAuthentication::new("login", "key"), tx);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "createTransactionRequest": {
                    "merchantAuthentication": { "name": "login", "transactionKey": "key" },
                    "transactionRequest": {
                        "transactionType": "authOnlyTransaction",
                        "amount": "10.00",
                        "currencyCode": "USD"
                    }
                }
            })
        );
    }

    #[test]
    fn test_debug_hides_transaction_key() {
        let auth = MerchantAuthentication::new("login", "s3cr3t-key");
        let debug = format!("{:?}", auth);
        assert!(debug.contains("login"));
        assert!(!debug.contains("s3cr3t-key"));
    }
}

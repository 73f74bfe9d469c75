//! Request parameters supplied by callers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::domain::address::non_empty;
use crate::domain::{Card, Currency, DeviceType, MarketType, MerchantAuthentication, Money};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Amounts
// ─────────────────────────────────────────────────────────────────────────────

/// The transaction amount as the caller gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    /// Major units, e.g. `"10.00"`.
    Decimal(String),
    /// Minor units, e.g. `1000`.
    Minor(i64),
}

/// Accepts a decimal written either as a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalText {
    Text(String),
    Number(serde_json::Number),
}

impl From<DecimalText> for String {
    fn from(value: DecimalText) -> Self {
        match value {
            DecimalText::Text(text) => text,
            DecimalText::Number(number) => number.to_string(),
        }
    }
}

fn decimal_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    DecimalText::deserialize(deserializer).map(String::from)
}

// ─────────────────────────────────────────────────────────────────────────────
// Basket items
// ─────────────────────────────────────────────────────────────────────────────

/// A basket entry. `price` is the line total, not the unit price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item identifier; the position in the basket is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Line total in major units
    #[serde(deserialize_with = "decimal_text")]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32, price: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            quantity: Some(quantity),
            price: price.into(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorize / purchase parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters of an authorize or purchase request.
///
/// Built either with the `with_*` methods or decoded from a camelCase JSON
/// document through [`AuthorizeParams::from_json`].
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "ParamsDocument")]
pub struct AuthorizeParams {
    pub auth_name: Option<String>,
    pub transaction_key: Option<String>,
    pub test_mode: bool,
    pub card: Option<Card>,
    pub amount: Option<AmountInput>,
    pub currency: Option<Currency>,
    pub items: Vec<Item>,
    pub invoice_number: Option<String>,
    pub description: Option<String>,
    pub client_ip: Option<String>,
    pub authentication_indicator: Option<String>,
    pub authentication_value: Option<String>,
    pub terminal_number: Option<String>,
    pub device_type: Option<DeviceType>,
    pub market_type: Option<MarketType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ParamsDocument {
    auth_name: Option<String>,
    transaction_key: Option<String>,
    #[serde(default)]
    test_mode: bool,
    card: Option<Card>,
    amount: Option<DecimalText>,
    amount_integer: Option<i64>,
    currency: Option<Currency>,
    #[serde(default)]
    items: Vec<Item>,
    invoice_number: Option<String>,
    description: Option<String>,
    client_ip: Option<String>,
    authentication_indicator: Option<String>,
    authentication_value: Option<String>,
    terminal_number: Option<String>,
    device_type: Option<DeviceType>,
    market_type: Option<MarketType>,
}

impl TryFrom<ParamsDocument> for AuthorizeParams {
    type Error = DomainError;

    fn try_from(doc: ParamsDocument) -> Result<Self, Self::Error> {
        let amount = match (doc.amount, doc.amount_integer) {
            (Some(_), Some(_)) => {
                return Err(DomainError::ValidationError(
                    "amount and amountInteger are mutually exclusive".into(),
                ));
            }
            (Some(decimal), None) => Some(AmountInput::Decimal(decimal.into())),
            (None, Some(minor)) => Some(AmountInput::Minor(minor)),
            (None, None) => None,
        };

        Ok(Self {
            auth_name: doc.auth_name,
            transaction_key: doc.transaction_key,
            test_mode: doc.test_mode,
            card: doc.card,
            amount,
            currency: doc.currency,
            items: doc.items,
            invoice_number: doc.invoice_number,
            description: doc.description,
            client_ip: doc.client_ip,
            authentication_indicator: doc.authentication_indicator,
            authentication_value: doc.authentication_value,
            terminal_number: doc.terminal_number,
            device_type: doc.device_type,
            market_type: doc.market_type,
        })
    }
}

impl AuthorizeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes parameters from a JSON document.
    ///
    /// # Validation
    /// - `authName` and `transactionKey` must be strings when present
    /// - unknown keys and mistyped values are rejected
    pub fn from_json(value: serde_json::Value) -> Result<Self, DomainError> {
        for (key, message) in [
            ("authName", "Auth name must be a string."),
            ("transactionKey", "Transaction Key must be a string."),
        ] {
            if let Some(v) = value.get(key) {
                if !v.is_string() && !v.is_null() {
                    return Err(DomainError::ValidationError(message.into()));
                }
            }
        }

        serde_json::from_value(value)
            .map_err(|e| DomainError::ValidationError(format!("Invalid parameters: {}", e)))
    }

    pub fn with_credentials(
        mut self,
        auth_name: impl Into<String>,
        transaction_key: impl Into<String>,
    ) -> Self {
        self.auth_name = Some(auth_name.into());
        self.transaction_key = Some(transaction_key.into());
        self
    }

    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    /// Sets the amount in major units, e.g. `"10.00"`.
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(AmountInput::Decimal(amount.into()));
        self
    }

    /// Sets the amount in minor units, e.g. `1000` for $10.00.
    pub fn with_amount_integer(mut self, amount: i64) -> Self {
        self.amount = Some(AmountInput::Minor(amount));
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    pub fn with_authentication(
        mut self,
        indicator: Option<String>,
        value: Option<String>,
    ) -> Self {
        self.authentication_indicator = indicator;
        self.authentication_value = value;
        self
    }

    pub fn with_terminal_number(mut self, terminal_number: impl Into<String>) -> Self {
        self.terminal_number = Some(terminal_number.into());
        self
    }

    pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    pub fn with_market_type(mut self, market_type: MarketType) -> Self {
        self.market_type = Some(market_type);
        self
    }

    /// Resolves the amount and currency into [`Money`].
    pub fn money(&self) -> Result<Money, DomainError> {
        let currency = self.currency.ok_or_else(|| {
            DomainError::ValidationError("The currency parameter is required".into())
        })?;
        match &self.amount {
            Some(AmountInput::Decimal(decimal)) => Money::from_decimal(decimal, currency),
            Some(AmountInput::Minor(minor)) => Money::new(*minor, currency),
            None => Err(DomainError::ValidationError(
                "The amount parameter is required".into(),
            )),
        }
    }

    /// Builds the merchant credentials; both values must be non-empty.
    pub fn merchant_authentication(&self) -> Result<MerchantAuthentication, DomainError> {
        let name = non_empty(self.auth_name.as_deref()).ok_or_else(|| {
            DomainError::ValidationError("The authName parameter is required".into())
        })?;
        let key = non_empty(self.transaction_key.as_deref()).ok_or_else(|| {
            DomainError::ValidationError("The transactionKey parameter is required".into())
        })?;
        Ok(MerchantAuthentication::new(name, key))
    }
}

impl fmt::Debug for AuthorizeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizeParams")
            .field("auth_name", &self.auth_name)
            .field("transaction_key", &self.transaction_key.as_ref().map(|_| "***"))
            .field("test_mode", &self.test_mode)
            .field("card", &self.card)
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("items", &self.items)
            .field("invoice_number", &self.invoice_number)
            .field("description", &self.description)
            .field("client_ip", &self.client_ip)
            .field("terminal_number", &self.terminal_number)
            .field("device_type", &self.device_type)
            .field("market_type", &self.market_type)
            .finish_non_exhaustive()
    }
}

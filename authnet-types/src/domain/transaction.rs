//! Transaction request document.

use serde::{Deserialize, Serialize, Serializer};

use super::address::NameAddress;
use super::line_item::LineItems;
use super::metadata::{CardholderAuthentication, Customer, Order, Retail};
use super::money::{Currency, Money};
use super::payment::Payment;

/// The kind of transaction requested from the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Authorize only; funds are captured later.
    #[serde(rename = "authOnlyTransaction")]
    AuthOnly,
    /// Authorize and capture in one step.
    #[serde(rename = "authCaptureTransaction")]
    AuthCapture,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::AuthOnly => write!(f, "authOnlyTransaction"),
            TransactionType::AuthCapture => write!(f, "authCaptureTransaction"),
        }
    }
}

/// A transaction request.
///
/// Values are immutable: every `with_*` method consumes the transaction and
/// returns a new one carrying the extra section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    transaction_type: TransactionType,
    amount: Money,
    payment: Option<Payment>,
    terminal_number: Option<String>,
    order: Option<Order>,
    line_items: Option<LineItems>,
    customer: Option<Customer>,
    bill_to: Option<NameAddress>,
    ship_to: Option<NameAddress>,
    customer_ip: Option<String>,
    cardholder_authentication: Option<CardholderAuthentication>,
    retail: Option<Retail>,
}

impl Transaction {
    /// Creates a transaction carrying only its type and amount.
    pub fn new(transaction_type: TransactionType, amount: Money) -> Self {
        Self {
            transaction_type,
            amount,
            payment: None,
            terminal_number: None,
            order: None,
            line_items: None,
            customer: None,
            bill_to: None,
            ship_to: None,
            customer_ip: None,
            cardholder_authentication: None,
            retail: None,
        }
    }

    pub fn with_payment(self, payment: Payment) -> Self {
        Self {
            payment: Some(payment),
            ..self
        }
    }

    pub fn with_terminal_number(self, terminal_number: Option<String>) -> Self {
        Self {
            terminal_number,
            ..self
        }
    }

    pub fn with_order(self, order: Order) -> Self {
        Self {
            order: Some(order),
            ..self
        }
    }

    pub fn with_line_items(self, line_items: LineItems) -> Self {
        Self {
            line_items: Some(line_items),
            ..self
        }
    }

    pub fn with_customer(self, customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            ..self
        }
    }

    pub fn with_bill_to(self, bill_to: NameAddress) -> Self {
        Self {
            bill_to: Some(bill_to),
            ..self
        }
    }

    pub fn with_ship_to(self, ship_to: NameAddress) -> Self {
        Self {
            ship_to: Some(ship_to),
            ..self
        }
    }

    pub fn with_customer_ip(self, customer_ip: impl Into<String>) -> Self {
        Self {
            customer_ip: Some(customer_ip.into()),
            ..self
        }
    }

    pub fn with_cardholder_authentication(self, auth: CardholderAuthentication) -> Self {
        Self {
            cardholder_authentication: Some(auth),
            ..self
        }
    }

    pub fn with_retail(self, retail: Retail) -> Self {
        Self {
            retail: Some(retail),
            ..self
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    pub fn terminal_number(&self) -> Option<&str> {
        self.terminal_number.as_deref()
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn line_items(&self) -> Option<&LineItems> {
        self.line_items.as_ref()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn bill_to(&self) -> Option<&NameAddress> {
        self.bill_to.as_ref()
    }

    pub fn ship_to(&self) -> Option<&NameAddress> {
        self.ship_to.as_ref()
    }

    pub fn customer_ip(&self) -> Option<&str> {
        self.customer_ip.as_deref()
    }

    pub fn cardholder_authentication(&self) -> Option<&CardholderAuthentication> {
        self.cardholder_authentication.as_ref()
    }

    pub fn retail(&self) -> Option<&Retail> {
        self.retail.as_ref()
    }
}

// Field order follows the gateway schema, which rejects out-of-order elements.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire<'a> {
    transaction_type: TransactionType,
    amount: String,
    currency_code: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment: Option<&'a Payment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    terminal_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_items: Option<&'a LineItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<&'a Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bill_to: Option<&'a NameAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ship_to: Option<&'a NameAddress>,
    #[serde(rename = "customerIP", skip_serializing_if = "Option::is_none")]
    customer_ip: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cardholder_authentication: Option<&'a CardholderAuthentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retail: Option<&'a Retail>,
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TransactionWire {
            transaction_type: self.transaction_type,
            amount: self.amount.to_decimal_string(),
            currency_code: self.amount.currency(),
            payment: self.payment.as_ref(),
            terminal_number: self.terminal_number.as_deref(),
            order: self.order.as_ref(),
            line_items: self.line_items.as_ref(),
            customer: self.customer.as_ref(),
            bill_to: self.bill_to.as_ref(),
            ship_to: self.ship_to.as_ref(),
            customer_ip: self.customer_ip.as_deref(),
            cardholder_authentication: self.cardholder_authentication.as_ref(),
            retail: self.retail.as_ref(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreditCard, DeviceType, MarketType};
    use serde_json::json;

    fn ten_dollars() -> Money {
        Money::new(1000, Currency::USD).unwrap()
    }

    #[test]
    fn test_minimal_transaction() {
        let tx = Transaction::new(TransactionType::AuthOnly, ten_dollars());
        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({
                "transactionType": "authOnlyTransaction",
                "amount": "10.00",
                "currencyCode": "USD"
            })
        );
    }

    #[test]
    fn test_with_returns_new_value() {
        let base = Transaction::new(TransactionType::AuthCapture, ten_dollars());
        let with_ip = base.clone().with_customer_ip("10.0.0.1");

        assert_eq!(base.customer_ip(), None);
        assert_eq!(with_ip.customer_ip(), Some("10.0.0.1"));
        assert_eq!(with_ip.transaction_type(), TransactionType::AuthCapture);
    }

    #[test]
    fn test_sections_follow_schema_order() {
        let tx = Transaction::new(TransactionType::AuthOnly, ten_dollars())
            .with_retail(Retail::new(MarketType::Retail, DeviceType::Unknown))
            .with_customer_ip("10.0.0.1")
            .with_customer(Customer::with_email("jo@example.com"))
            .with_terminal_number(Some("T-1".into()))
            .with_payment(Payment::CreditCard(CreditCard::new("4111111111111111", "1225")));

        let encoded = serde_json::to_string(&tx).unwrap();
        let positions: Vec<usize> = [
            "\"transactionType\"",
            "\"amount\"",
            "\"currencyCode\"",
            "\"payment\"",
            "\"terminalNumber\"",
            "\"customer\"",
            "\"customerIP\"",
            "\"retail\"",
        ]
        .iter()
        .map(|key| encoded.find(key).unwrap())
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_absent_terminal_number_is_omitted() {
        let tx = Transaction::new(TransactionType::AuthOnly, ten_dollars()).with_terminal_number(None);
        let value = serde_json::to_value(&tx).unwrap();
        assert!(value.get("terminalNumber").is_none());
    }
}

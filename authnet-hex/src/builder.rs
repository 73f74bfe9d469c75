//! Transaction Builder
//!
//! Maps flat caller parameters onto a transaction document, attaching each
//! optional section only when its inputs are present.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use authnet_types::domain::{
    CardholderAuthentication, Customer, LineItem, LineItems, Order, Retail,
};
use authnet_types::{AuthorizeParams, DomainError, Money, Transaction, TransactionType};

/// Builds a [`Transaction`] of a fixed type from [`AuthorizeParams`].
///
/// Building is all-or-nothing: the first failing rule aborts with an error
/// and no partial transaction is returned.
pub struct TransactionBuilder<'a> {
    params: &'a AuthorizeParams,
    transaction_type: TransactionType,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(params: &'a AuthorizeParams, transaction_type: TransactionType) -> Self {
        Self {
            params,
            transaction_type,
        }
    }

    /// Builder for an authorize-only transaction.
    pub fn authorize(params: &'a AuthorizeParams) -> Self {
        Self::new(params, TransactionType::AuthOnly)
    }

    /// Builder for an authorize-and-capture transaction.
    pub fn purchase(params: &'a AuthorizeParams) -> Self {
        Self::new(params, TransactionType::AuthCapture)
    }

    /// Builds the transaction, checking card expiry against today's UTC date.
    pub fn build(&self) -> Result<Transaction, DomainError> {
        self.build_at(Utc::now().date_naive())
    }

    /// Builds the transaction, checking card expiry against `today`.
    pub fn build_at(&self, today: NaiveDate) -> Result<Transaction, DomainError> {
        let params = self.params;
        let amount = params.money()?;
        let mut tx = Transaction::new(self.transaction_type, amount);

        if let Some(card) = &params.card {
            let bill_to = card.billing_address();
            if bill_to.has_any() {
                tx = tx.with_bill_to(bill_to);
            }
            let ship_to = card.shipping_address();
            if ship_to.has_any() {
                tx = tx.with_ship_to(ship_to);
            }
            if let Some(email) = card.email() {
                tx = tx.with_customer(Customer::with_email(email));
            }
            if let Some(payment) = card.payment_at(today)? {
                debug!(payment = %payment.describe(), "Attaching payment");
                tx = tx.with_payment(payment);
            }
        }

        if let Some(client_ip) = present(&params.client_ip) {
            tx = tx.with_customer_ip(client_ip);
        }

        let has_tracks = params.card.as_ref().is_some_and(|card| card.has_tracks());
        if params.device_type.is_some() || params.market_type.is_some() || has_tracks {
            let retail = Retail::new(
                params.market_type.unwrap_or_default(),
                params.device_type.unwrap_or_default(),
            );
            debug!(
                market_type = %retail.market_type(),
                device_type = %retail.device_type(),
                "Attaching retail section"
            );
            tx = tx.with_retail(retail);
        }

        if let Some(order) =
            Order::from_parts(present(&params.invoice_number), present(&params.description))
        {
            tx = tx.with_order(order);
        }

        if let Some(auth) = CardholderAuthentication::from_parts(
            present(&params.authentication_indicator),
            present(&params.authentication_value),
        ) {
            tx = tx.with_cardholder_authentication(auth);
        }

        let line_items = self.line_items(amount)?;
        if !line_items.is_empty() {
            debug!(count = line_items.len(), "Attaching line items");
            tx = tx.with_line_items(line_items);
        }

        Ok(tx.with_terminal_number(present(&params.terminal_number)))
    }

    /// Converts basket entries into line items priced per unit.
    fn line_items(&self, amount: Money) -> Result<LineItems, DomainError> {
        let mut line_items = LineItems::new();
        for (index, item) in self.params.items.iter().enumerate() {
            let total = Money::from_decimal(&item.price, amount.currency())?;
            let unit_price = match item.quantity {
                Some(quantity) if quantity > 0 => total.divide(quantity)?,
                _ => total,
            };
            let item_id = present(&item.id).unwrap_or_else(|| index.to_string());

            line_items.push(LineItem::new(
                item_id,
                present(&item.name),
                present(&item.description),
                item.quantity,
                unit_price,
                item.taxable,
            ));
        }
        Ok(line_items)
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

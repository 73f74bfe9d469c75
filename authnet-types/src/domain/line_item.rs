//! Basket line items.

use serde::{Serialize, Serializer};

use super::money::Money;

/// A single basket entry, priced per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(serialize_with = "money_as_decimal")]
    unit_price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    taxable: Option<bool>,
}

impl LineItem {
    pub fn new(
        item_id: impl Into<String>,
        name: Option<String>,
        description: Option<String>,
        quantity: Option<u32>,
        unit_price: Money,
        taxable: Option<bool>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name,
            description,
            quantity,
            unit_price,
            taxable,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

/// Ordered collection of line items, serialized as `{"lineItem": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItems {
    line_item: Vec<LineItem>,
}

impl LineItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: LineItem) {
        self.line_item.push(item);
    }

    pub fn len(&self) -> usize {
        self.line_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_item.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.line_item.iter()
    }
}

pub(crate) fn money_as_decimal<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&money.to_decimal_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use serde_json::json;

    #[test]
    fn test_line_items_wire_shape() {
        let mut items = LineItems::new();
        items.push(LineItem::new(
            "0",
            Some("Widget".into()),
            None,
            Some(3),
            Money::new(333, Currency::USD).unwrap(),
            None,
        ));

        assert_eq!(items.len(), 1);
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!({
                "lineItem": [{
                    "itemId": "0",
                    "name": "Widget",
                    "quantity": 3,
                    "unitPrice": "3.33"
                }]
            })
        );
    }
}

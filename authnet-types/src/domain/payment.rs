//! Payment presentment attached to a transaction.

use serde::{Serialize, Serializer};
use std::fmt;

/// Keyed card details.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    card_number: String,
    /// `MMYY`
    expiration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_code: Option<String>,
}

impl CreditCard {
    pub fn new(card_number: impl Into<String>, expiration_date: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            expiration_date: expiration_date.into(),
            card_code: None,
        }
    }

    pub fn with_card_code(self, card_code: impl Into<String>) -> Self {
        Self {
            card_code: Some(card_code.into()),
            ..self
        }
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn expiration_date(&self) -> &str {
        &self.expiration_date
    }

    pub fn card_code(&self) -> Option<&str> {
        self.card_code.as_deref()
    }

    /// The card number with all but the last four digits replaced by `X`.
    pub fn number_masked(&self) -> String {
        mask_number(&self.card_number)
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("card_number", &self.number_masked())
            .field("expiration_date", &self.expiration_date)
            .field("card_code", &self.card_code.as_ref().map(|_| "***"))
            .finish()
    }
}

pub(crate) fn mask_number(number: &str) -> String {
    let hidden = number.chars().count().saturating_sub(4);
    number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { 'X' } else { c })
        .collect()
}

/// How the card is presented. Exactly one mode per transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    CreditCard(CreditCard),
    Track1(String),
    Track2(String),
}

impl Payment {
    /// A loggable description that never exposes the full card data.
    pub fn describe(&self) -> String {
        match self {
            Payment::CreditCard(card) => format!("card {}", card.number_masked()),
            Payment::Track1(_) => "track1".to_string(),
            Payment::Track2(_) => "track2".to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum PaymentWire<'a> {
    CreditCard(&'a CreditCard),
    TrackData(TrackWire<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum TrackWire<'a> {
    Track1(&'a str),
    Track2(&'a str),
}

impl Serialize for Payment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Payment::CreditCard(card) => PaymentWire::CreditCard(card),
            Payment::Track1(data) => PaymentWire::TrackData(TrackWire::Track1(data)),
            Payment::Track2(data) => PaymentWire::TrackData(TrackWire::Track2(data)),
        };
        wire.serialize(serializer)
    }
}

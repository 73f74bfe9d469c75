//! Caller-supplied card data and its validation rules.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::address::{NameAddress, non_empty};
use super::payment::{CreditCard, Payment, mask_number};
use crate::error::DomainError;

static TRACK1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%B\d{1,19}\^.{2,26}\^\d{4}\d*\?").expect("valid track1 pattern"));

static TRACK2_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";\d{1,19}=\d{4}\d*\?").expect("valid track2 pattern"));

/// Card, cardholder and address data as supplied by the caller.
///
/// Fields are stored as given; normalisation happens in the accessors:
/// the number keeps only its digits, a two-digit expiry year is widened to
/// `20YY`, and empty strings count as absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Card {
    pub number: Option<String>,
    pub expiry_month: Option<u32>,
    pub expiry_year: Option<i32>,
    pub cvv: Option<String>,
    /// Raw swipe data holding one or both magnetic tracks.
    pub tracks: Option<String>,
    pub track1: Option<String>,
    pub track2: Option<String>,

    pub billing_first_name: Option<String>,
    pub billing_last_name: Option<String>,
    pub billing_company: Option<String>,
    pub billing_address1: Option<String>,
    pub billing_address2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_postcode: Option<String>,
    pub billing_state: Option<String>,
    pub billing_country: Option<String>,
    pub billing_phone: Option<String>,
    pub billing_fax: Option<String>,

    pub shipping_first_name: Option<String>,
    pub shipping_last_name: Option<String>,
    pub shipping_company: Option<String>,
    pub shipping_address1: Option<String>,
    pub shipping_address2: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_postcode: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_country: Option<String>,

    pub email: Option<String>,
}

impl Card {
    /// Sets the cardholder first name on both billing and shipping blocks.
    pub fn with_first_name(self, first_name: impl Into<String>) -> Self {
        let first_name = first_name.into();
        Self {
            billing_first_name: Some(first_name.clone()),
            shipping_first_name: Some(first_name),
            ..self
        }
    }

    /// Sets the cardholder last name on both billing and shipping blocks.
    pub fn with_last_name(self, last_name: impl Into<String>) -> Self {
        let last_name = last_name.into();
        Self {
            billing_last_name: Some(last_name.clone()),
            shipping_last_name: Some(last_name),
            ..self
        }
    }

    /// The card number reduced to its digits.
    pub fn number(&self) -> Option<String> {
        self.number
            .as_deref()
            .map(|n| n.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|n| !n.is_empty())
    }

    pub fn number_masked(&self) -> Option<String> {
        self.number().map(|n| mask_number(&n))
    }

    /// The expiry year with two-digit years widened to `20YY`.
    pub fn expiry_year(&self) -> Option<i32> {
        self.expiry_year
            .map(|year| if (0..100).contains(&year) { 2000 + year } else { year })
    }

    /// Expiry as sent to the gateway: two-digit month, two-digit year.
    pub fn expiry_mmyy(&self) -> Option<String> {
        let month = self.expiry_month?;
        let year = self.expiry_year()?;
        Some(format!("{:02}{:02}", month, year.rem_euclid(100)))
    }

    pub fn cvv(&self) -> Option<String> {
        non_empty(self.cvv.as_deref())
    }

    pub fn email(&self) -> Option<String> {
        non_empty(self.email.as_deref())
    }

    /// Track 1 data, either given directly or found in the swipe data.
    pub fn track1(&self) -> Option<String> {
        non_empty(self.track1.as_deref()).or_else(|| self.find_track(&TRACK1_PATTERN))
    }

    /// Track 2 data, either given directly or found in the swipe data.
    pub fn track2(&self) -> Option<String> {
        non_empty(self.track2.as_deref()).or_else(|| self.find_track(&TRACK2_PATTERN))
    }

    /// Returns true if any magnetic-stripe data was supplied.
    pub fn has_tracks(&self) -> bool {
        [&self.tracks, &self.track1, &self.track2]
            .iter()
            .any(|t| non_empty(t.as_deref()).is_some())
    }

    fn find_track(&self, pattern: &Regex) -> Option<String> {
        let tracks = self.tracks.as_deref()?;
        pattern.find(tracks).map(|m| m.as_str().to_string())
    }

    pub fn billing_address(&self) -> NameAddress {
        NameAddress::new(
            self.billing_first_name.as_deref(),
            self.billing_last_name.as_deref(),
            self.billing_company.as_deref(),
            Some(&join_lines(&self.billing_address1, &self.billing_address2)),
            self.billing_city.as_deref(),
            self.billing_state.as_deref(),
            self.billing_postcode.as_deref(),
            self.billing_country.as_deref(),
        )
        .with_phone_number(self.billing_phone.as_deref())
        .with_fax_number(self.billing_fax.as_deref())
    }

    pub fn shipping_address(&self) -> NameAddress {
        NameAddress::new(
            self.shipping_first_name.as_deref(),
            self.shipping_last_name.as_deref(),
            self.shipping_company.as_deref(),
            Some(&join_lines(&self.shipping_address1, &self.shipping_address2)),
            self.shipping_city.as_deref(),
            self.shipping_state.as_deref(),
            self.shipping_postcode.as_deref(),
            self.shipping_country.as_deref(),
        )
    }

    /// Validates the keyed card data against the given date.
    ///
    /// # Validation
    /// - Number, expiry month and expiry year are required
    /// - Month must be 1-12 and the card must not have expired
    /// - Number must be 12 to 19 digits and pass the Luhn check
    /// - CVV, when present, must be 3 or 4 digits
    pub fn validate_at(&self, today: NaiveDate) -> Result<(), DomainError> {
        let number = self
            .number()
            .ok_or_else(|| DomainError::InvalidCard("The number parameter is required".into()))?;
        let month = self.expiry_month.ok_or_else(|| {
            DomainError::InvalidCard("The expiryMonth parameter is required".into())
        })?;
        let year = self.expiry_year().ok_or_else(|| {
            DomainError::InvalidCard("The expiryYear parameter is required".into())
        })?;

        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidCard(format!(
                "Expiry month {} is out of range",
                month
            )));
        }
        if (year, month) < (today.year(), today.month()) {
            return Err(DomainError::InvalidCard("Card has expired".into()));
        }
        if !(12..=19).contains(&number.len()) {
            return Err(DomainError::InvalidCard(
                "Card number should have 12 to 19 digits".into(),
            ));
        }
        if !luhn_valid(&number) {
            return Err(DomainError::InvalidCard("Card number is invalid".into()));
        }
        if let Some(cvv) = self.cvv() {
            let digits = cvv.chars().all(|c| c.is_ascii_digit());
            if !digits || !(3..=4).contains(&cvv.len()) {
                return Err(DomainError::InvalidCard("CVV should have 3 or 4 digits".into()));
            }
        }
        Ok(())
    }

    /// Selects the payment mode: keyed number, then track 1, then track 2.
    ///
    /// Only the keyed number path is validated.
    pub fn payment_at(&self, today: NaiveDate) -> Result<Option<Payment>, DomainError> {
        if let Some(number) = self.number() {
            self.validate_at(today)?;
            let expiry = self.expiry_mmyy().unwrap_or_default();
            let mut card = CreditCard::new(number, expiry);
            if let Some(cvv) = self.cvv() {
                card = card.with_card_code(cvv);
            }
            return Ok(Some(Payment::CreditCard(card)));
        }
        if let Some(track1) = self.track1() {
            return Ok(Some(Payment::Track1(track1)));
        }
        Ok(self.track2().map(Payment::Track2))
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.number_masked())
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("has_tracks", &self.has_tracks())
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn join_lines(line1: &Option<String>, line2: &Option<String>) -> String {
    format!(
        "{} {}",
        line1.as_deref().unwrap_or_default(),
        line2.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string()
}

/// Luhn checksum over a digit string.
pub fn luhn_valid(number: &str) -> bool {
    let mut sum = 0;
    for (i, c) in number.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    !number.is_empty() && sum % 10 == 0
}

//! Name and address block used for `billTo` and `shipTo`.

use serde::Serialize;

/// A name/address block.
///
/// Empty strings are treated as absent, so a block built entirely from
/// empty input reports `has_any() == false` and is never attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fax_number: Option<String>,
}

/// Keeps a value only if it has visible content.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl NameAddress {
    /// Creates a block from its name and postal fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        company: Option<&str>,
        address: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        zip: Option<&str>,
        country: Option<&str>,
    ) -> Self {
        Self {
            first_name: non_empty(first_name),
            last_name: non_empty(last_name),
            company: non_empty(company),
            address: non_empty(address),
            city: non_empty(city),
            state: non_empty(state),
            zip: non_empty(zip),
            country: non_empty(country),
            phone_number: None,
            fax_number: None,
        }
    }

    pub fn with_phone_number(self, phone_number: Option<&str>) -> Self {
        Self {
            phone_number: non_empty(phone_number),
            ..self
        }
    }

    pub fn with_fax_number(self, fax_number: Option<&str>) -> Self {
        Self {
            fax_number: non_empty(fax_number),
            ..self
        }
    }

    /// Returns true if at least one field carries a value.
    pub fn has_any(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.company,
            &self.address,
            &self.city,
            &self.state,
            &self.zip,
            &self.country,
            &self.phone_number,
            &self.fax_number,
        ]
        .iter()
        .any(|field| field.is_some())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
}

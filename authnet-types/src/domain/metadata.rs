//! Optional transaction sections: customer, order, retail and 3-D Secure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Customer details. Only the email address is carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    email: String,
}

impl Customer {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Invoice number and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Order {
    /// Returns an order only if at least one of its fields is present.
    pub fn from_parts(invoice_number: Option<String>, description: Option<String>) -> Option<Self> {
        if invoice_number.is_none() && description.is_none() {
            return None;
        }
        Some(Self {
            invoice_number,
            description,
        })
    }

    pub fn invoice_number(&self) -> Option<&str> {
        self.invoice_number.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// 3-D Secure proof values obtained from an external authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardholderAuthentication {
    #[serde(skip_serializing_if = "Option::is_none")]
    authentication_indicator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cardholder_authentication_value: Option<String>,
}

impl CardholderAuthentication {
    /// Returns the section only if the indicator or the value is present.
    pub fn from_parts(indicator: Option<String>, value: Option<String>) -> Option<Self> {
        if indicator.is_none() && value.is_none() {
            return None;
        }
        Some(Self {
            authentication_indicator: indicator,
            cardholder_authentication_value: value,
        })
    }

    pub fn indicator(&self) -> Option<&str> {
        self.authentication_indicator.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.cardholder_authentication_value.as_deref()
    }
}

/// Retail market type, sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MarketType {
    Ecommerce,
    Moto,
    #[default]
    Retail,
}

impl From<MarketType> for u8 {
    fn from(value: MarketType) -> Self {
        match value {
            MarketType::Ecommerce => 0,
            MarketType::Moto => 1,
            MarketType::Retail => 2,
        }
    }
}

impl TryFrom<u8> for MarketType {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MarketType::Ecommerce),
            1 => Ok(MarketType::Moto),
            2 => Ok(MarketType::Retail),
            other => Err(DomainError::ValidationError(format!(
                "Unknown market type: {}",
                other
            ))),
        }
    }
}

impl FromStr for MarketType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ecommerce" => Ok(MarketType::Ecommerce),
            "moto" => Ok(MarketType::Moto),
            "retail" => Ok(MarketType::Retail),
            other => other
                .parse::<u8>()
                .map_err(|_| DomainError::ValidationError(format!("Unknown market type: {}", s)))
                .and_then(MarketType::try_from),
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketType::Ecommerce => write!(f, "ecommerce"),
            MarketType::Moto => write!(f, "moto"),
            MarketType::Retail => write!(f, "retail"),
        }
    }
}

/// Retail device type, sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DeviceType {
    #[default]
    Unknown,
    UnattendedTerminal,
    SelfServiceTerminal,
    ElectronicCashRegister,
    PersonalComputerTerminal,
    AirPay,
    WirelessPos,
    Website,
    DialTerminal,
    VirtualTerminal,
}

const DEVICE_TYPES: [(DeviceType, &str); 10] = [
    (DeviceType::Unknown, "unknown"),
    (DeviceType::UnattendedTerminal, "unattended_terminal"),
    (DeviceType::SelfServiceTerminal, "self_service_terminal"),
    (DeviceType::ElectronicCashRegister, "electronic_cash_register"),
    (DeviceType::PersonalComputerTerminal, "personal_computer_terminal"),
    (DeviceType::AirPay, "air_pay"),
    (DeviceType::WirelessPos, "wireless_pos"),
    (DeviceType::Website, "website"),
    (DeviceType::DialTerminal, "dial_terminal"),
    (DeviceType::VirtualTerminal, "virtual_terminal"),
];

impl From<DeviceType> for u8 {
    fn from(value: DeviceType) -> Self {
        // codes start at 1
        DEVICE_TYPES
            .iter()
            .position(|(device, _)| *device == value)
            .map_or(1, |index| index as u8 + 1)
    }
}

impl TryFrom<u8> for DeviceType {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        usize::from(value)
            .checked_sub(1)
            .and_then(|index| DEVICE_TYPES.get(index))
            .map(|(device, _)| *device)
            .ok_or_else(|| DomainError::ValidationError(format!("Unknown device type: {}", value)))
    }
}

impl FromStr for DeviceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Some((device, _)) = DEVICE_TYPES.iter().find(|(_, name)| *name == wanted) {
            return Ok(*device);
        }
        wanted
            .parse::<u8>()
            .map_err(|_| DomainError::ValidationError(format!("Unknown device type: {}", s)))
            .and_then(DeviceType::try_from)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = DEVICE_TYPES
            .iter()
            .find(|(device, _)| device == self)
            .map_or("unknown", |(_, name)| name);
        f.write_str(name)
    }
}

/// Card-present terminal details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Retail {
    market_type: MarketType,
    device_type: DeviceType,
}

impl Retail {
    pub fn new(market_type: MarketType, device_type: DeviceType) -> Self {
        Self {
            market_type,
            device_type,
        }
    }

    pub fn market_type(&self) -> MarketType {
        self.market_type
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_requires_a_field() {
        assert!(Order::from_parts(None, None).is_none());
        let order = Order::from_parts(Some("INV-1".into()), None).unwrap();
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({ "invoiceNumber": "INV-1" })
        );
    }

    #[test]
    fn test_cardholder_authentication_requires_a_field() {
        assert!(CardholderAuthentication::from_parts(None, None).is_none());
        let auth = CardholderAuthentication::from_parts(None, Some("CAVV".into())).unwrap();
        assert_eq!(
            serde_json::to_value(&auth).unwrap(),
            json!({ "cardholderAuthenticationValue": "CAVV" })
        );
    }

    #[test]
    fn test_retail_codes() {
        let retail = Retail::new(MarketType::Retail, DeviceType::Unknown);
        assert_eq!(
            serde_json::to_value(retail).unwrap(),
            json!({ "marketType": 2, "deviceType": 1 })
        );
        assert_eq!(u8::from(DeviceType::VirtualTerminal), 10);
        assert_eq!(DeviceType::try_from(7).unwrap(), DeviceType::WirelessPos);
        assert!(DeviceType::try_from(0).is_err());
        assert!(DeviceType::try_from(11).is_err());
        assert!(MarketType::try_from(3).is_err());
    }

    #[test]
    fn test_parse_by_name_or_code() {
        assert_eq!("moto".parse::<MarketType>().unwrap(), MarketType::Moto);
        assert_eq!("0".parse::<MarketType>().unwrap(), MarketType::Ecommerce);
        assert_eq!(
            "Wireless_POS".parse::<DeviceType>().unwrap(),
            DeviceType::WirelessPos
        );
        assert_eq!("5".parse::<DeviceType>().unwrap(), DeviceType::PersonalComputerTerminal);
        assert!("kiosk".parse::<DeviceType>().is_err());
        assert_eq!(DeviceType::SelfServiceTerminal.to_string(), "self_service_terminal");
    }

    #[test]
    fn test_deserialize_rejects_unknown_code() {
        assert!(serde_json::from_value::<DeviceType>(json!(42)).is_err());
        assert_eq!(
            serde_json::from_value::<MarketType>(json!(1)).unwrap(),
            MarketType::Moto
        );
    }
}

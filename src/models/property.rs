//! Property and unit models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::pricing::RentalUnit;

/// Largest nightly price accepted from the remote API, in naira
pub const MAX_NIGHTLY_PRICE: i64 = 1_000_000_000_000;

/// Whether a nightly price is within the accepted range
pub fn is_supported_price(price: Decimal) -> bool {
    price <= Decimal::from(MAX_NIGHTLY_PRICE)
}

/// Property as returned by the remote API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_pet_allowed: bool,
    #[serde(default)]
    pub units: Vec<UnitRecord>,
    #[serde(default)]
    pub media: Vec<MediaRecord>,
    #[serde(default)]
    pub agent: Option<AgentRecord>,
}

/// Unit as returned by the remote API. Money fields arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_guests: u32,
    pub price_per_night: serde_json::Value,
    #[serde(default)]
    pub caution_fee: Option<serde_json::Value>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub media: Vec<MediaRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub file_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentRecord {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Property ready for the booking widget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: String,
    pub is_verified: bool,
    pub is_pet_allowed: bool,
    pub agent_name: Option<String>,
    pub media: Vec<String>,
    pub units: Vec<RentalUnit>,
}

impl Property {
    pub fn unit(&self, unit_id: u64) -> Option<&RentalUnit> {
        self.units.iter().find(|u| u.id == unit_id)
    }
}

/// A remote record that breaks the unit invariants
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("unit {unit_id}: unreadable {field}")]
    Unparseable { unit_id: u64, field: &'static str },

    #[error("unit {unit_id}: nightly price {price} is negative")]
    NegativePrice { unit_id: u64, price: Decimal },

    #[error("unit {unit_id}: nightly price {price} exceeds the supported maximum")]
    PriceTooLarge { unit_id: u64, price: Decimal },

    #[error("unit {unit_id}: caution fee rate {rate} is outside [0, 1]")]
    CautionFeeOutOfRange { unit_id: u64, rate: Decimal },

    #[error("unit {unit_id}: max guests must be positive")]
    NoGuestCapacity { unit_id: u64 },
}

impl PropertyRecord {
    /// Validate the record and convert every unit into a `RentalUnit`
    pub fn parse(self) -> Result<Property, RecordError> {
        let units = self
            .units
            .into_iter()
            .map(UnitRecord::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Property {
            id: self.id,
            name: self.name,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
            property_type: self.property_type,
            is_verified: self.is_verified,
            is_pet_allowed: self.is_pet_allowed,
            agent_name: self.agent.map(|a| a.name),
            media: self.media.into_iter().map(|m| m.file_url).collect(),
            units,
        })
    }
}

impl UnitRecord {
    pub fn parse(self) -> Result<RentalUnit, RecordError> {
        let unit_id = self.id;

        let base_price = parse_decimal(&self.price_per_night).ok_or(RecordError::Unparseable {
            unit_id,
            field: "pricePerNight",
        })?;
        if base_price.is_sign_negative() && !base_price.is_zero() {
            return Err(RecordError::NegativePrice {
                unit_id,
                price: base_price,
            });
        }
        if !is_supported_price(base_price) {
            return Err(RecordError::PriceTooLarge {
                unit_id,
                price: base_price,
            });
        }

        // Missing, null and blank all mean "no caution fee"
        let caution_fee_rate = match &self.caution_fee {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(parse_decimal(value).ok_or(RecordError::Unparseable {
                unit_id,
                field: "cautionFee",
            })?),
        };
        if let Some(rate) = caution_fee_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(RecordError::CautionFeeOutOfRange { unit_id, rate });
            }
        }

        if self.max_guests == 0 {
            return Err(RecordError::NoGuestCapacity { unit_id });
        }

        Ok(RentalUnit {
            id: unit_id,
            name: self.name,
            base_price,
            caution_fee_rate,
            max_guests: self.max_guests,
            description: self.description,
            amenities: self.amenities,
            media: self.media.into_iter().map(|m| m.file_url).collect(),
        })
    }
}

/// Read a decimal sent either as a JSON string or a JSON number
pub fn parse_decimal(value: &serde_json::Value) -> Option<Decimal> {
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

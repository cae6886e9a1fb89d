//! Endpoint paths and response envelopes of the remote API

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::models::PropertyRecord;
use crate::models::property::{is_supported_price, parse_decimal};
use crate::pricing::AvailabilityRecord;

/// Every response wraps its payload in `{ "data": ... }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

pub type PropertyEnvelope = Envelope<PropertyRecord>;
pub type AvailabilityEnvelope = Envelope<Vec<AvailabilityRow>>;

/// One availability row as sent by the API
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRow {
    pub date: String,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
}

impl AvailabilityRow {
    /// Rows whose date cannot be read carry no usable rate and are dropped
    pub fn parse(&self) -> Option<AvailabilityRecord> {
        // Accept both `2024-06-01` and full timestamps
        let day = self.date.get(..10).unwrap_or(&self.date);
        let date = match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                debug!("Skipping availability row with date {:?}: {}", self.date, e);
                return None;
            }
        };

        let price = self.price.as_ref().and_then(parse_decimal);
        let price = match price {
            Some(price) if !is_supported_price(price) => {
                debug!("Ignoring out-of-range price {} for {}", price, date);
                None
            }
            other => other,
        };

        Some(AvailabilityRecord { date, price })
    }
}

/// Path of the property lookup
pub fn property_path(property_id: u64) -> String {
    format!("properties/{}", property_id)
}

/// Path and query of the availability lookup
pub fn availability_request(
    property_id: u64,
    unit_id: u64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> (String, Vec<(&'static str, String)>) {
    (
        format!("properties/{}/units/{}/availability", property_id, unit_id),
        vec![
            ("startDate", check_in.format("%Y-%m-%d").to_string()),
            ("endDate", check_out.format("%Y-%m-%d").to_string()),
        ],
    )
}

pub fn parse_availability(rows: &[AvailabilityRow]) -> Vec<AvailabilityRecord> {
    rows.iter().filter_map(AvailabilityRow::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_availability_envelope() {
        let body = r#"{"data": [
            {"date": "2024-06-01", "price": "65000"},
            {"date": "2024-06-02T00:00:00.000Z"},
            {"date": "garbage", "price": 1}
        ]}"#;
        let envelope: AvailabilityEnvelope = serde_json::from_str(body).unwrap();
        let records = parse_availability(&envelope.data);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, Some(dec!(65000)));
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(records[1].price, None);
    }

    #[test]
    fn test_out_of_range_price_is_dropped() {
        let body = r#"{"data": [
            {"date": "2024-06-01", "price": "79228162514264337593543950335"},
            {"date": "2024-06-02", "price": 1e20}
        ]}"#;
        let envelope: AvailabilityEnvelope = serde_json::from_str(body).unwrap();
        let records = parse_availability(&envelope.data);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.price.is_none()));
    }

    #[test]
    fn test_empty_availability() {
        let envelope: AvailabilityEnvelope = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parse_availability(&envelope.data).is_empty());
    }

    #[test]
    fn test_availability_request_shape() {
        let (path, query) = availability_request(
            12,
            4,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
        );
        assert_eq!(path, "properties/12/units/4/availability");
        assert_eq!(
            query,
            vec![
                ("startDate", "2024-06-01".to_string()),
                ("endDate", "2024-06-04".to_string()),
            ]
        );
        assert_eq!(property_path(12), "properties/12");
    }
}

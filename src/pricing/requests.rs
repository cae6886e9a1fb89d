//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use super::models::{DateRange, OccupancyCounts};

/// Query string for a live quote
#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub pets: u32,
}

impl QuoteQuery {
    pub fn dates(&self) -> DateRange {
        DateRange::from_dates(self.check_in, self.check_out)
    }

    pub fn occupancy(&self) -> OccupancyCounts {
        OccupancyCounts::new(self.adults, self.children, self.pets)
    }
}

/// Request to turn a selection into a booking draft
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub unit_id: u64,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub pets: u32,
}

impl CreateBookingRequest {
    pub fn dates(&self) -> DateRange {
        DateRange::from_dates(self.check_in, self.check_out)
    }

    pub fn occupancy(&self) -> OccupancyCounts {
        OccupancyCounts::new(self.adults, self.children, self.pets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_booking_request_camel_case() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{"unitId": 3, "checkIn": "2024-06-01", "checkOut": "2024-06-04", "adults": 2, "pets": 1}"#,
        )
        .unwrap();

        assert_eq!(req.unit_id, 3);
        assert_eq!(req.occupancy(), OccupancyCounts::new(2, 0, 1));
        assert!(req.dates().is_complete());
    }

    #[test]
    fn test_create_booking_request_without_dates() {
        let req: CreateBookingRequest = serde_json::from_str(r#"{"unitId": 3}"#).unwrap();
        assert_eq!(req.dates(), DateRange::default());
        assert_eq!(req.occupancy(), OccupancyCounts::default());
    }
}

//! In-memory `RentalApi` for tests

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{ApiError, RentalApi};
use crate::models::Property;
use crate::pricing::{AvailabilityRecord, DateRange, RentalUnit};

type AvailabilityKey = (u64, NaiveDate, NaiveDate);

pub(crate) struct FakeRentalApi {
    property: Option<Property>,
    availability: HashMap<AvailabilityKey, (Vec<AvailabilityRecord>, Duration)>,
    fail_availability: bool,
    property_calls: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeRentalApi {
    /// No properties at all
    pub fn empty() -> Self {
        Self {
            property: None,
            availability: HashMap::new(),
            fail_availability: false,
            property_calls: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Property 12 with unit 4 (₦50,000, 10% caution, 4 guests) and
    /// unit 5 (₦80,000, no caution fee, 2 guests)
    pub fn with_sample_property() -> Self {
        let unit = |id: u64, name: &str, price: Decimal, rate: Option<Decimal>, max_guests: u32| {
            RentalUnit {
                id,
                name: name.to_string(),
                base_price: price,
                caution_fee_rate: rate,
                max_guests,
                description: format!("{} description", name),
                amenities: vec!["FREE WIFI".to_string()],
                media: vec![format!("https://cdn.example.com/units/{}.jpg", id)],
            }
        };

        Self {
            property: Some(Property {
                id: 12,
                name: "Lekki Residences".to_string(),
                description: "Serviced apartments".to_string(),
                address: "1 Admiralty Way".to_string(),
                city: "Lagos".to_string(),
                state: "Lagos".to_string(),
                country: "Nigeria".to_string(),
                latitude: Some(6.4474),
                longitude: Some(3.4553),
                property_type: "APARTMENT".to_string(),
                is_verified: true,
                is_pet_allowed: true,
                agent_name: Some("Ada".to_string()),
                media: vec![],
                units: vec![
                    unit(4, "Ocean View Studio", dec!(50000), Some(dec!(0.1)), 4),
                    unit(5, "Penthouse", dec!(80000), None, 2),
                ],
            }),
            ..Self::empty()
        }
    }

    /// Answer lookups for `range` with one record priced at `price`
    pub fn availability_price(
        mut self,
        unit_id: u64,
        range: DateRange,
        price: Decimal,
        delay: Duration,
    ) -> Self {
        let (check_in, check_out) = range.calendar_dates().expect("complete range");
        self.availability.insert(
            (unit_id, check_in, check_out),
            (
                vec![AvailabilityRecord {
                    date: check_in,
                    price: Some(price),
                }],
                delay,
            ),
        );
        self
    }

    pub fn failing_availability(mut self) -> Self {
        self.fail_availability = true;
        self
    }

    pub fn unit(&self, unit_id: u64) -> RentalUnit {
        self.property
            .as_ref()
            .and_then(|p| p.unit(unit_id))
            .cloned()
            .expect("unknown unit")
    }

    pub fn property_calls(&self) -> usize {
        self.property_calls.load(Ordering::SeqCst)
    }

    pub fn availability_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RentalApi for FakeRentalApi {
    async fn get_property(&self, property_id: u64) -> Result<Property, ApiError> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        self.property
            .clone()
            .filter(|p| p.id == property_id)
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("property {}", property_id),
            })
    }

    async fn get_unit_availability(
        &self,
        _property_id: u64,
        unit_id: u64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<AvailabilityRecord>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_availability {
            return Err(ApiError::Status {
                status: 503,
                url: "fake://availability".to_string(),
            });
        }

        match self.availability.get(&(unit_id, check_in, check_out)) {
            Some((records, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(records.clone())
            }
            None => Ok(vec![]),
        }
    }
}

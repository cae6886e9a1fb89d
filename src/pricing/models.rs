//! Value types for booking price calculations.
//!
//! Everything here is a plain value: units are selected (never created) by the
//! viewer, and quotes are recomputed from scratch on every input change.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// A bookable unit within a property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalUnit {
    pub id: u64,
    pub name: String,
    /// Nightly base price, never negative
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    /// Caution fee as a fraction of the total charge, in [0, 1]
    #[serde(with = "rust_decimal::serde::str_option")]
    pub caution_fee_rate: Option<Decimal>,
    pub max_guests: u32,
    pub description: String,
    pub amenities: Vec<String>,
    pub media: Vec<String>,
}

impl RentalUnit {
    /// First media item, used as the unit's thumbnail in drafts
    pub fn representative_image(&self) -> Option<&str> {
        self.media.first().map(String::as_str)
    }
}

/// Check-in/check-out selection.
///
/// Either end may be missing while the viewer is still picking. A range is only
/// usable for pricing once both ends are set and check-out is strictly later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(check_in: Option<NaiveDateTime>, check_out: Option<NaiveDateTime>) -> Self {
        Self { check_in, check_out }
    }

    /// Build a range from calendar dates, each at local midnight
    pub fn from_dates(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        Self {
            check_in: check_in.map(|d| d.and_time(NaiveTime::MIN)),
            check_out: check_out.map(|d| d.and_time(NaiveTime::MIN)),
        }
    }

    /// Both ends present and in order
    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    /// The (check-in, check-out) pair, only for a complete range
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) if check_out > check_in => {
                Some((check_in, check_out))
            }
            _ => None,
        }
    }

    /// Calendar dates of a complete range, dropping any time of day
    pub fn calendar_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.bounds().map(|(check_in, check_out)| (check_in.date(), check_out.date()))
    }
}

/// Guest and pet counts for a stay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OccupancyCounts {
    pub adults: u32,
    pub children: u32,
    pub pets: u32,
}

impl OccupancyCounts {
    pub fn new(adults: u32, children: u32, pets: u32) -> Self {
        Self {
            adults,
            children,
            pets,
        }
    }

    /// People counted against a unit's max guests (pets excluded)
    pub fn guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// One date-priced record returned by the availability lookup
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRecord {
    pub date: NaiveDate,
    pub price: Option<Decimal>,
}

/// Derived price summary for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// Whole nights, 0 while the range is incomplete
    pub nights: u32,
    /// Date-specific rate if one was resolved, else the unit's base price
    pub effective_rate: Decimal,
    /// Whether `effective_rate` came from the availability lookup
    pub date_specific: bool,
    pub total: Decimal,
    pub caution_fee: Decimal,
}

impl PriceQuote {
    /// Nights to show in summaries; an undetermined stay displays as one night
    pub fn display_nights(&self) -> u32 {
        self.nights.max(1)
    }

    /// Zero rate means the price is not known yet
    pub fn is_price_known(&self) -> bool {
        !self.effective_rate.is_zero()
    }
}

/// Snapshot handed to the downstream confirmation/payment flow.
///
/// Built once when the viewer confirms and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub property_id: u64,
    pub unit_id: u64,
    pub title: String,
    /// `YYYY-MM-DD`
    pub check_in_date: String,
    /// `YYYY-MM-DD`
    pub check_out_date: String,
    pub adults: u32,
    pub children: u32,
    pub pets: u32,
    pub nights: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_charge: Decimal,
    pub unit_image: String,
}

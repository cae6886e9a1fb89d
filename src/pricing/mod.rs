//! Booking price engine.
//!
//! Derives nights, nightly rate, total charge and caution fee for a unit
//! selection, and gates the hand-off of booking drafts.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{format_price, round_money};
pub use models::{
    AvailabilityRecord, BookingDraft, DateRange, OccupancyCounts, PriceQuote, RentalUnit,
};
pub use services::{confirm_booking, derive_quote, BookingError};

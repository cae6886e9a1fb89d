//! Quote derivation and the booking confirmation gate.
//!
//! These functions combine the calculators into the two operations the booking
//! widget needs: "what does the current selection cost" and "may this selection
//! be handed off as a draft".

use rust_decimal::Decimal;
use tracing::warn;

use super::calculators::{
    calculate_caution_fee, calculate_nights, calculate_total, resolve_effective_rate,
};
use super::models::{BookingDraft, DateRange, OccupancyCounts, PriceQuote, RentalUnit};

/// Message shown when the gate refuses a draft
pub const INCOMPLETE_BOOKING_MESSAGE: &str =
    "Please ensure unit price, nights, and adults are set before proceeding.";

/// Booking validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    Incomplete {
        message: String,
        missing: Vec<String>,
    },
    TooManyGuests {
        requested: u32,
        max_guests: u32,
    },
    NoUnitSelected,
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Incomplete { message, .. } => write!(f, "{}", message),
            BookingError::TooManyGuests {
                requested,
                max_guests,
            } => {
                write!(
                    f,
                    "{} guests requested but this unit hosts at most {}",
                    requested, max_guests
                )
            }
            BookingError::NoUnitSelected => write!(f, "Select a unit before booking"),
        }
    }
}

impl std::error::Error for BookingError {}

/// Derive the price quote for the current selection.
///
/// Without a unit the base price is unknown, so the rate can only come from a
/// date-specific price. A total too large to represent is reported as an
/// unknown price, which the confirmation gate refuses.
pub fn derive_quote(
    unit: Option<&RentalUnit>,
    dates: &DateRange,
    occupancy: &OccupancyCounts,
    date_price: Option<Decimal>,
) -> PriceQuote {
    let nights = calculate_nights(dates.check_in, dates.check_out);
    let effective_rate = resolve_effective_rate(unit.map(|u| u.base_price), date_price);

    let amounts = calculate_total(effective_rate, nights, occupancy.pets).and_then(|total| {
        calculate_caution_fee(total, unit.and_then(|u| u.caution_fee_rate))
            .map(|caution_fee| (total, caution_fee))
    });

    match amounts {
        Some((total, caution_fee)) => PriceQuote {
            nights,
            effective_rate,
            date_specific: date_price.is_some(),
            total,
            caution_fee,
        },
        None => {
            warn!(
                "Total for {} nights at {} overflows, treating price as unknown",
                nights, effective_rate
            );
            PriceQuote {
                nights,
                effective_rate: Decimal::ZERO,
                date_specific: false,
                total: Decimal::ZERO,
                caution_fee: Decimal::ZERO,
            }
        }
    }
}

/// Validate a selection and build the draft for the downstream booking flow.
///
/// Refuses when the rate, nights or adult count is zero. Dates are written as
/// calendar dates with no time of day.
pub fn confirm_booking(
    property_id: u64,
    unit: Option<&RentalUnit>,
    dates: &DateRange,
    occupancy: &OccupancyCounts,
    quote: &PriceQuote,
) -> Result<BookingDraft, BookingError> {
    let mut missing = Vec::new();
    if quote.effective_rate.is_zero() {
        missing.push("price".to_string());
    }
    if quote.nights == 0 {
        missing.push("nights".to_string());
    }
    if occupancy.adults == 0 {
        missing.push("adults".to_string());
    }
    if !missing.is_empty() {
        return Err(BookingError::Incomplete {
            message: INCOMPLETE_BOOKING_MESSAGE.to_string(),
            missing,
        });
    }

    let unit = unit.ok_or(BookingError::NoUnitSelected)?;

    // nights > 0 implies a complete range
    let (check_in, check_out) = dates.calendar_dates().ok_or_else(|| BookingError::Incomplete {
        message: INCOMPLETE_BOOKING_MESSAGE.to_string(),
        missing: vec!["dates".to_string()],
    })?;

    Ok(BookingDraft {
        property_id,
        unit_id: unit.id,
        title: unit.name.clone(),
        check_in_date: check_in.format("%Y-%m-%d").to_string(),
        check_out_date: check_out.format("%Y-%m-%d").to_string(),
        adults: occupancy.adults,
        children: occupancy.children,
        pets: occupancy.pets,
        nights: quote.nights,
        base_price: quote.effective_rate,
        total_charge: quote.total,
        unit_image: unit.representative_image().unwrap_or_default().to_string(),
    })
}

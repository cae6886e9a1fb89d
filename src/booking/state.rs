//! Booking widget state and its reducer.
//!
//! One `BookingState` exists per property view. Every user input and every
//! availability response is a `BookingEvent`; `reduce` maps the current state
//! and an event to the next state plus at most one side effect for the caller
//! to perform. The reducer itself never performs I/O.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::calculators::date_specific_price;
use crate::pricing::services::{confirm_booking, derive_quote, BookingError};
use crate::pricing::{
    AvailabilityRecord, BookingDraft, DateRange, OccupancyCounts, PriceQuote, RentalUnit,
};

/// Where the selection stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPhase {
    /// No unit, or no complete date range yet
    Idle,
    /// Unit and dates chosen, availability lookup in flight
    DatesSelected,
    /// Lookup settled with a non-zero nightly rate
    PriceResolved,
    /// Lookup settled but no rate is known
    PriceUnknown,
    /// A draft was handed off for the current selection
    Confirmed,
}

/// Identifies one availability lookup.
///
/// A response is only applied while its ticket is still the pending one, so a
/// newer selection always supersedes older in-flight lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    pub generation: u64,
    pub property_id: u64,
    pub unit_id: u64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Inputs to the booking widget
#[derive(Debug, Clone)]
pub enum BookingEvent {
    SelectUnit(RentalUnit),
    SetDates(DateRange),
    SetCheckIn(Option<NaiveDateTime>),
    SetCheckOut(Option<NaiveDateTime>),
    SetOccupancy(OccupancyCounts),
    /// Single guest field: adults = total (clamped to capacity), children = 0
    SetGuests(u32),
    SetPets(u32),
    AvailabilityLoaded {
        ticket: LookupTicket,
        records: Vec<AvailabilityRecord>,
    },
    AvailabilityFailed {
        ticket: LookupTicket,
        reason: String,
    },
    Confirm,
}

/// Work the caller must carry out after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start an availability lookup for this ticket
    FetchAvailability(LookupTicket),
    /// Pass the draft to the downstream booking flow
    HandOff(BookingDraft),
    /// Show this validation error; the state did not change
    Reject(BookingError),
    /// A response arrived for a superseded ticket and was ignored
    DiscardStale(LookupTicket),
}

/// Result of one reducer step
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: BookingState,
    pub effect: Option<Effect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingState {
    property_id: u64,
    unit: Option<RentalUnit>,
    dates: DateRange,
    occupancy: OccupancyCounts,
    date_price: Option<Decimal>,
    pending: Option<LookupTicket>,
    lookup_settled: bool,
    generation: u64,
    phase: BookingPhase,
}

impl BookingState {
    pub fn new(property_id: u64) -> Self {
        Self {
            property_id,
            unit: None,
            dates: DateRange::default(),
            occupancy: OccupancyCounts::default(),
            date_price: None,
            pending: None,
            lookup_settled: false,
            generation: 0,
            phase: BookingPhase::Idle,
        }
    }

    pub fn property_id(&self) -> u64 {
        self.property_id
    }

    pub fn unit(&self) -> Option<&RentalUnit> {
        self.unit.as_ref()
    }

    pub fn dates(&self) -> &DateRange {
        &self.dates
    }

    pub fn occupancy(&self) -> &OccupancyCounts {
        &self.occupancy
    }

    pub fn date_price(&self) -> Option<Decimal> {
        self.date_price
    }

    pub fn pending_lookup(&self) -> Option<&LookupTicket> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> BookingPhase {
        self.phase
    }

    /// Quote for the current inputs; uses the base price while a lookup is pending
    pub fn quote(&self) -> PriceQuote {
        derive_quote(self.unit.as_ref(), &self.dates, &self.occupancy, self.date_price)
    }

    /// New dates: drop any resolved price and open a lookup if the range is usable
    fn change_dates(&mut self, dates: DateRange) -> Option<Effect> {
        if dates == self.dates {
            return None;
        }

        self.dates = dates;
        self.date_price = None;
        self.pending = None;
        self.lookup_settled = false;
        self.issue_lookup().map(Effect::FetchAvailability)
    }

    fn issue_lookup(&mut self) -> Option<LookupTicket> {
        let unit_id = self.unit.as_ref()?.id;
        let (check_in, check_out) = self.dates.calendar_dates()?;

        self.generation += 1;
        let ticket = LookupTicket {
            generation: self.generation,
            property_id: self.property_id,
            unit_id,
            check_in,
            check_out,
        };
        self.pending = Some(ticket.clone());
        Some(ticket)
    }

    /// Recompute the phase from the inputs
    fn settle_phase(&mut self) {
        self.phase = if self.unit.is_none() || !self.dates.is_complete() {
            BookingPhase::Idle
        } else if !self.lookup_settled {
            BookingPhase::DatesSelected
        } else if self.quote().is_price_known() {
            BookingPhase::PriceResolved
        } else {
            BookingPhase::PriceUnknown
        };
    }

    fn accepts(&self, ticket: &LookupTicket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }
}

/// Apply one event to the state.
///
/// Rejected inputs and stale responses leave the state untouched.
pub fn reduce(state: &BookingState, event: BookingEvent) -> Transition {
    let mut next = state.clone();

    let effect = match event {
        BookingEvent::SelectUnit(unit) => {
            let switched = next.unit.as_ref().map(|u| u.id) != Some(unit.id);
            next.unit = Some(unit);
            if switched {
                // Switching units discards everything entered for the previous one
                next.dates = DateRange::default();
                next.occupancy = OccupancyCounts::default();
                next.date_price = None;
                next.pending = None;
                next.lookup_settled = false;
            }
            None
        }
        BookingEvent::SetDates(dates) => next.change_dates(dates),
        BookingEvent::SetCheckIn(check_in) => {
            let dates = DateRange::new(check_in, next.dates.check_out);
            next.change_dates(dates)
        }
        BookingEvent::SetCheckOut(check_out) => {
            let dates = DateRange::new(next.dates.check_in, check_out);
            next.change_dates(dates)
        }
        BookingEvent::SetOccupancy(occupancy) => {
            if let Some(unit) = &next.unit {
                if occupancy.guests() > unit.max_guests {
                    return Transition {
                        state: state.clone(),
                        effect: Some(Effect::Reject(BookingError::TooManyGuests {
                            requested: occupancy.guests(),
                            max_guests: unit.max_guests,
                        })),
                    };
                }
            }
            next.occupancy = occupancy;
            None
        }
        BookingEvent::SetGuests(total) => {
            let capped = match &next.unit {
                Some(unit) => total.min(unit.max_guests),
                None => total,
            };
            next.occupancy.adults = capped;
            next.occupancy.children = 0;
            None
        }
        BookingEvent::SetPets(pets) => {
            next.occupancy.pets = pets;
            None
        }
        BookingEvent::AvailabilityLoaded { ticket, records } => {
            if !next.accepts(&ticket) {
                return Transition {
                    state: state.clone(),
                    effect: Some(Effect::DiscardStale(ticket)),
                };
            }
            next.date_price = date_specific_price(&records);
            next.pending = None;
            next.lookup_settled = true;
            None
        }
        BookingEvent::AvailabilityFailed { ticket, .. } => {
            if !next.accepts(&ticket) {
                return Transition {
                    state: state.clone(),
                    effect: Some(Effect::DiscardStale(ticket)),
                };
            }
            // Lookup failures fall back to the base price
            next.date_price = None;
            next.pending = None;
            next.lookup_settled = true;
            None
        }
        BookingEvent::Confirm => {
            let quote = next.quote();
            return match confirm_booking(
                next.property_id,
                next.unit.as_ref(),
                &next.dates,
                &next.occupancy,
                &quote,
            ) {
                Ok(draft) => {
                    next.phase = BookingPhase::Confirmed;
                    Transition {
                        state: next,
                        effect: Some(Effect::HandOff(draft)),
                    }
                }
                Err(e) => Transition {
                    state: state.clone(),
                    effect: Some(Effect::Reject(e)),
                },
            };
        }
    };

    next.settle_phase();
    Transition {
        state: next,
        effect,
    }
}

//! Booking widget state machine.
//!
//! `state` holds the pure reducer; `session` drives it with background
//! availability lookups.

pub mod session;
pub mod state;

pub use session::BookingSession;
pub use state::{
    reduce, BookingEvent, BookingPhase, BookingState, Effect, LookupTicket, Transition,
};

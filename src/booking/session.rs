//! Async driver around the booking reducer.
//!
//! The session owns the state of one booking widget, runs availability
//! lookups in the background and feeds their results back through the
//! reducer, where tickets decide whether a response still applies.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::state::{reduce, BookingEvent, BookingState, Effect, LookupTicket, Transition};
use crate::api::RentalApi;
use crate::pricing::PriceQuote;

pub struct BookingSession {
    api: Arc<dyn RentalApi>,
    state: BookingState,
    lookups: JoinSet<BookingEvent>,
}

impl BookingSession {
    pub fn new(api: Arc<dyn RentalApi>, property_id: u64) -> Self {
        Self {
            api,
            state: BookingState::new(property_id),
            lookups: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn quote(&self) -> PriceQuote {
        self.state.quote()
    }

    /// Number of lookups still running, stale ones included
    pub fn lookups_in_flight(&self) -> usize {
        self.lookups.len()
    }

    /// Apply an event and start any lookup it asks for.
    ///
    /// Never blocks on the network; the quote keeps using the base price until
    /// a lookup result is applied.
    pub fn dispatch(&mut self, event: BookingEvent) -> Option<Effect> {
        let Transition { state, effect } = reduce(&self.state, event);
        self.state = state;

        match &effect {
            Some(Effect::FetchAvailability(ticket)) => self.spawn_lookup(ticket.clone()),
            Some(Effect::DiscardStale(ticket)) => {
                debug!(
                    "Discarded stale availability for unit {} (lookup #{})",
                    ticket.unit_id, ticket.generation
                );
            }
            Some(Effect::Reject(e)) => debug!("Booking input rejected: {}", e),
            Some(Effect::HandOff(draft)) => {
                info!(
                    "Booking draft ready: property {} unit {} for {} nights",
                    draft.property_id, draft.unit_id, draft.nights
                );
            }
            None => {}
        }

        effect
    }

    fn spawn_lookup(&mut self, ticket: LookupTicket) {
        debug!(
            "Availability lookup #{} for unit {} ({} to {})",
            ticket.generation, ticket.unit_id, ticket.check_in, ticket.check_out
        );

        let api = Arc::clone(&self.api);
        self.lookups.spawn(async move {
            let result = api
                .get_unit_availability(
                    ticket.property_id,
                    ticket.unit_id,
                    ticket.check_in,
                    ticket.check_out,
                )
                .await;

            match result {
                Ok(records) => BookingEvent::AvailabilityLoaded { ticket, records },
                Err(e) => BookingEvent::AvailabilityFailed {
                    ticket,
                    reason: e.to_string(),
                },
            }
        });
    }

    /// Wait for the next lookup to finish and apply it.
    ///
    /// Returns `false` when no lookup is in flight.
    pub async fn apply_next_lookup(&mut self) -> bool {
        let Some(joined) = self.lookups.join_next().await else {
            return false;
        };

        match joined {
            Ok(event) => {
                if let BookingEvent::AvailabilityFailed { ticket, reason } = &event {
                    warn!(
                        "Availability lookup failed for unit {}, using base price: {}",
                        ticket.unit_id, reason
                    );
                }
                self.dispatch(event);
            }
            Err(e) => warn!("Availability lookup task ended abnormally: {}", e),
        }
        true
    }

    /// Apply every outstanding lookup
    pub async fn settle(&mut self) {
        while self.apply_next_lookup().await {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeRentalApi;
    use crate::booking::BookingPhase;
    use crate::pricing::{DateRange, OccupancyCounts};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn june(check_in: u32, check_out: u32) -> DateRange {
        DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 6, check_in),
            NaiveDate::from_ymd_opt(2024, 6, check_out),
        )
    }

    fn session(api: FakeRentalApi) -> (BookingSession, Arc<FakeRentalApi>) {
        let api = Arc::new(api);
        (BookingSession::new(api.clone(), 12), api)
    }

    #[tokio::test]
    async fn test_lookup_applies_date_price() {
        let api = FakeRentalApi::with_sample_property()
            .availability_price(4, june(1, 4), dec!(60000), Duration::ZERO);
        let (mut session, api) = session(api);
        let unit = api.unit(4);

        session.dispatch(BookingEvent::SelectUnit(unit));
        session.dispatch(BookingEvent::SetDates(june(1, 4)));
        assert_eq!(session.state().phase(), BookingPhase::DatesSelected);
        assert_eq!(session.quote().effective_rate, dec!(50000));

        session.settle().await;
        assert_eq!(session.state().phase(), BookingPhase::PriceResolved);
        assert_eq!(session.quote().effective_rate, dec!(60000));
        assert_eq!(session.lookups_in_flight(), 0);
    }

    #[tokio::test]
    async fn test_slow_superseded_lookup_is_ignored() {
        let api = FakeRentalApi::with_sample_property()
            .availability_price(4, june(1, 4), dec!(99999), Duration::from_millis(80))
            .availability_price(4, june(2, 5), dec!(60000), Duration::ZERO);
        let (mut session, api) = session(api);

        session.dispatch(BookingEvent::SelectUnit(api.unit(4)));
        session.dispatch(BookingEvent::SetDates(june(1, 4)));
        session.dispatch(BookingEvent::SetDates(june(2, 5)));
        assert_eq!(session.lookups_in_flight(), 2);

        session.settle().await;
        assert_eq!(session.state().date_price(), Some(dec!(60000)));
        assert_eq!(*session.state().dates(), june(2, 5));
        assert_eq!(api.availability_calls(), 2);
    }

    #[tokio::test]
    async fn test_unit_switch_ignores_old_lookup() {
        let api = FakeRentalApi::with_sample_property().availability_price(
            4,
            june(1, 4),
            dec!(99999),
            Duration::from_millis(30),
        );
        let (mut session, api) = session(api);

        session.dispatch(BookingEvent::SelectUnit(api.unit(4)));
        session.dispatch(BookingEvent::SetDates(june(1, 4)));
        session.dispatch(BookingEvent::SelectUnit(api.unit(5)));

        session.settle().await;
        assert_eq!(session.state().unit().map(|u| u.id), Some(5));
        assert_eq!(session.state().date_price(), None);
        assert_eq!(session.state().phase(), BookingPhase::Idle);
    }

    #[tokio::test]
    async fn test_failed_lookup_falls_back_to_base_price() {
        let api = FakeRentalApi::with_sample_property().failing_availability();
        let (mut session, api) = session(api);

        session.dispatch(BookingEvent::SelectUnit(api.unit(4)));
        session.dispatch(BookingEvent::SetDates(june(1, 4)));
        session.dispatch(BookingEvent::SetOccupancy(OccupancyCounts::new(2, 0, 1)));
        session.settle().await;

        assert_eq!(session.state().phase(), BookingPhase::PriceResolved);
        let quote = session.quote();
        assert_eq!(quote.effective_rate, dec!(50000));
        assert_eq!(quote.total, dec!(150001));
        assert_eq!(quote.caution_fee, dec!(15000.1));
    }

    #[tokio::test]
    async fn test_settle_without_lookups_returns() {
        let (mut session, _) = session(FakeRentalApi::with_sample_property());
        assert!(!session.apply_next_lookup().await);
        session.settle().await;
        assert_eq!(session.state().phase(), BookingPhase::Idle);
    }
}

//! HTTP route handlers

pub mod bookings;
pub mod properties;

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::booking::{BookingEvent, BookingSession, Effect};
use crate::error::{AppError, Result};
use crate::pricing::{DateRange, OccupancyCounts};
use crate::AppState;

/// All routes served by the booking front end
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/properties/:id", get(properties::detail))
        .route(
            "/api/properties/:id/units/:unit_id/quote",
            get(properties::quote),
        )
        .route("/api/properties/:id/bookings", post(bookings::create))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Replay a selection through a fresh booking session and wait for its
/// availability lookup to settle
async fn open_session(
    state: &AppState,
    property_id: u64,
    unit_id: u64,
    dates: DateRange,
    occupancy: OccupancyCounts,
) -> Result<BookingSession> {
    let property = state.api.get_property(property_id).await?;
    let unit = property
        .unit(unit_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Unit {}", unit_id)))?;

    let mut session = BookingSession::new(Arc::clone(&state.api), property_id);
    session.dispatch(BookingEvent::SelectUnit(unit));
    session.dispatch(BookingEvent::SetDates(dates));
    if let Some(Effect::Reject(e)) = session.dispatch(BookingEvent::SetOccupancy(occupancy)) {
        return Err(e.into());
    }

    session.settle().await;
    Ok(session)
}

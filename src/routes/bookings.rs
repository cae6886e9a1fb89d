//! Booking draft handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::open_session;
use crate::booking::{BookingEvent, Effect};
use crate::error::{AppError, Result};
use crate::pricing::requests::CreateBookingRequest;
use crate::pricing::BookingDraft;
use crate::AppState;

/// Run the confirmation gate and return the draft for the confirmation step
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDraft>)> {
    let mut session = open_session(
        &state,
        id,
        request.unit_id,
        request.dates(),
        request.occupancy(),
    )
    .await?;

    match session.dispatch(BookingEvent::Confirm) {
        Some(Effect::HandOff(draft)) => Ok((StatusCode::CREATED, Json(draft))),
        Some(Effect::Reject(e)) => Err(e.into()),
        other => Err(AppError::Internal(format!(
            "unexpected confirmation outcome: {:?}",
            other
        ))),
    }
}

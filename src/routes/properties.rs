//! Property detail and live quote handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use super::open_session;
use crate::error::Result;
use crate::models::Property;
use crate::pricing::requests::QuoteQuery;
use crate::pricing::responses::QuoteResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PropertyDetailResponse {
    pub data: Property,
}

/// Property with its bookable units
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<PropertyDetailResponse>> {
    let property = state.api.get_property(id).await?;
    tracing::debug!("Property {} has {} units", id, property.units.len());

    Ok(Json(PropertyDetailResponse { data: property }))
}

/// Price the selection described by the query string
pub async fn quote(
    State(state): State<AppState>,
    Path((id, unit_id)): Path<(u64, u64)>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>> {
    let session = open_session(&state, id, unit_id, query.dates(), query.occupancy()).await?;
    let booking = session.state();

    Ok(Json(QuoteResponse::new(
        booking.phase(),
        &booking.quote(),
        booking.occupancy(),
    )))
}

//! Remote rental API.
//!
//! The booking front end owns no data; properties, units and per-date
//! availability all come from the remote REST API behind this trait.

pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod queries;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Property, RecordError};
use crate::pricing::AvailabilityRecord;

pub use client::HttpRentalApi;

/// Errors talking to the remote API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] RecordError),
}

/// Collaborator contracts the booking widget relies on
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// Property with its units, by identifier
    async fn get_property(&self, property_id: u64) -> Result<Property, ApiError>;

    /// Date-priced availability records for a unit over a stay.
    ///
    /// An empty list means no date-specific rate is available.
    async fn get_unit_availability(
        &self,
        property_id: u64,
        unit_id: u64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<AvailabilityRecord>, ApiError>;
}

//! Aparte booking front end.
//!
//! Serves property details, live price quotes and booking drafts for the
//! property detail view, backed entirely by the remote rental API.

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::api::RentalApi;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn RentalApi>,
}

/// Build the application router with its middleware stack
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ApiError;
use crate::pricing::responses::ErrorResponse;
use crate::pricing::BookingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Upstream API error: {0}")]
    Upstream(#[from] ApiError),

    #[error("{0}")]
    Booking(#[from] BookingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, details) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::Upstream(ApiError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "not_found", None)
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream API error: {}", e);
                (StatusCode::BAD_GATEWAY, "upstream_error", None)
            }
            AppError::Booking(BookingError::Incomplete { missing, .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "incomplete_booking",
                Some(serde_json::json!({ "missing": missing })),
            ),
            AppError::Booking(BookingError::TooManyGuests {
                requested,
                max_guests,
            }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "too_many_guests",
                Some(serde_json::json!({ "requested": requested, "maxGuests": max_guests })),
            ),
            AppError::Booking(BookingError::NoUnitSelected) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "no_unit_selected", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", None)
            }
        };

        // Upstream and internal details stay in the logs
        let message = match status {
            StatusCode::BAD_GATEWAY => "The rental service is unavailable".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => "Internal error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = AppError::NotFound("unit 9".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let upstream = AppError::from(ApiError::Status {
            status: 500,
            url: "https://api.example.com/properties/1".to_string(),
        })
        .into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let missing = AppError::from(ApiError::NotFound {
            resource: "property 1".to_string(),
        })
        .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(BookingError::NoUnitSelected).into_response();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::DateRange;
use crate::store::StoreError;

/// One invalid field reported by the validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: &str) -> Self {
        FieldError {
            field,
            message: message.to_owned(),
        }
    }
}

/// Failure taxonomy shared by both engines and the HTTP boundary. Every
/// variant is final for the request; nothing here is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context}")]
    Validation {
        context: &'static str,
        errors: Vec<FieldError>,
    },
    #[error("Venue not found")]
    VenueNotFound,
    #[error("Attendee count exceeds venue capacity. Maximum allowed: {capacity}")]
    CapacityExceeded { capacity: i32 },
    #[error("Selected dates are not available for this venue")]
    DatesUnavailable { conflicts: Vec<DateRange> },
    /// Unexpected failure. The detail is logged and never reaches the
    /// response body.
    #[error("An unexpected error occurred")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::VenueNotFound => "VENUE_NOT_FOUND",
            ApiError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            ApiError::DatesUnavailable { .. } => "DATES_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation { errors, .. } => Some(serde_json::json!(errors)),
            ApiError::DatesUnavailable { conflicts } => {
                Some(serde_json::json!({ "conflictingDates": conflicts }))
            }
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::CapacityExceeded { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::VenueNotFound => StatusCode::NOT_FOUND,
            ApiError::DatesUnavailable { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            log::error!("unexpected error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
                details: self.details(),
            },
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(e: r2d2::Error) -> Self {
        ApiError::Internal(format!("failed to get DB connection: {}", e))
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        ApiError::Internal(format!("blocking task failed: {}", e))
    }
}

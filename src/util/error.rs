use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::repository::storage_error::StorageError;
use crate::validation::{FieldError, ValidationError};

/// Message shown to callers for failures on our side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong while processing your request";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    Validation,
    BadRequest,
    PayloadTooLarge,
    UnsupportedMediaType,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::PayloadTooLarge => "PayloadTooLarge",
            HandlerErrorKind::UnsupportedMediaType => "UnsupportedMediaType",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
}

impl HandlerError {
    /// Error for a body the JSON extractor refused. Size and content type
    /// problems keep their own status; anything else is a bad request.
    pub fn unreadable_body<T: Into<String>>(status: StatusCode, message: T) -> Self {
        let error = match status {
            StatusCode::PAYLOAD_TOO_LARGE => HandlerErrorKind::PayloadTooLarge,
            StatusCode::UNSUPPORTED_MEDIA_TYPE => HandlerErrorKind::UnsupportedMediaType,
            _ => HandlerErrorKind::BadRequest,
        };
        HandlerError { error, message: message.into(), errors: None }
    }

    pub fn internal() -> Self {
        HandlerError {
            error: HandlerErrorKind::Internal,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            errors: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            HandlerErrorKind::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: HandlerErrorKind,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.error,
            message: &self.message,
            errors: self.errors.as_deref(),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: "Validation failed".to_string(),
            errors: Some(err.errors),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

// Validation problems are the caller's to fix; anything else stays server side.
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => {
                warn!(fields = ?e.fields(), "Rejected invalid quote request");
                HandlerError::from(e)
            }
            ServiceError::Storage(e) => {
                error!(error = %e, "Quote storage failed");
                HandlerError::internal()
            }
        }
    }
}

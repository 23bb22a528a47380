//! Status-coded response envelope and error body.
//!
//! # Invariants
//! - Success statuses are `200`, `201` and `204`; `204` never has a body.
//! - Every error response carries an [`ErrorBody`] whose `status` matches
//!   the envelope status.
//! - Storage failures are reported as `500` without internal details.

use catalog_core::ServiceError;
use log::error;
use serde::Serialize;
use serde_json::Value;

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const NO_CONTENT: u16 = 204;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const CONFLICT: u16 = 409;
pub const UNPROCESSABLE_ENTITY: u16 = 422;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Transport-neutral response: status code, optional location, JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(body: &T) -> Self {
        Self::with_body(OK, None, body)
    }

    pub fn created(location: String) -> Self {
        Self {
            status: CREATED,
            location: Some(location),
            body: None,
        }
    }

    pub fn created_with_body<T: Serialize>(location: String, body: &T) -> Self {
        Self::with_body(CREATED, Some(location), body)
    }

    pub fn no_content() -> Self {
        Self {
            status: NO_CONTENT,
            location: None,
            body: None,
        }
    }

    /// Plain `404` for lookups that found nothing.
    pub fn not_found() -> Self {
        Self {
            status: NOT_FOUND,
            location: None,
            body: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_error_body(&ErrorBody::standard(message))
    }

    pub fn from_error(err: &ServiceError) -> Self {
        Self::from_error_body(&ErrorBody::from_service_error(err))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn from_error_body(body: &ErrorBody) -> Self {
        Self::with_body(body.status, None, body)
    }

    fn with_body<T: Serialize>(status: u16, location: Option<String>, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                location,
                body: Some(value),
            },
            Err(err) => {
                error!("event=api_response module=api status=error error_code=serialize error={err}");
                Self {
                    status: INTERNAL_SERVER_ERROR,
                    location: None,
                    body: None,
                }
            }
        }
    }
}

/// Single field-level failure inside an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error payload shared by every failing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    pub fn standard(message: impl Into<String>) -> Self {
        Self::new(BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(CONFLICT, message)
    }

    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            status: UNPROCESSABLE_ENTITY,
            message: message.into(),
            errors,
        }
    }

    pub fn from_service_error(err: &ServiceError) -> Self {
        match err {
            ServiceError::DuplicateRecord(message) => Self::conflict(message.as_str()),
            ServiceError::OperationNotAllowed(message) | ServiceError::InvalidArgument(message) => {
                Self::standard(message.as_str())
            }
            ServiceError::NotFound { .. } => Self::new(NOT_FOUND, err.to_string()),
            ServiceError::Validation(validation) => Self::validation(
                "validation error",
                vec![FieldError {
                    field: validation.field().to_string(),
                    message: validation.to_string(),
                }],
            ),
            ServiceError::Repo(repo) => {
                error!("event=api_response module=api status=error error_code=storage error={repo}");
                Self::new(INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }

    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

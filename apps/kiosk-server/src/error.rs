//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk Server                       │
//! │                                                                         │
//! │  POST /api/v1/orders/new                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler → Service                                               │  │
//! │  │  ApiResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── CoreError::InvalidInput ──┐              │  │
//! │  │         │                                        │              │  │
//! │  │         ▼                                        ▼              │  │
//! │  │  Database Error? ─── DbError::QueryFailed ──── ApiError ───────►│  │
//! │  │         │                                        ▲              │  │
//! │  │         ▼                                        │              │  │
//! │  │  Mail Error? ─── MailError::Transport ───────────┘              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  HTTP 400 {"code":"VALIDATION_ERROR","message":"...","fieldErrors":[]}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use kiosk_core::{CoreError, ValidationError};
use kiosk_db::DbError;

use crate::mail::MailError;

/// Result alias for service and handler code.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Product type is required.",
///   "fieldErrors": [
///     { "field": "type", "message": "Product type is required." }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field validation messages; empty for non-validation errors
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Unique constraint kept losing (409)
    Conflict,

    /// Mail transport failed (502)
    MailError,

    /// Database operation failed (500)
    DatabaseError,

    /// Business logic error (422)
    BusinessLogic,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status the code is reported with.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::MailError => StatusCode::BAD_GATEWAY,
            ErrorCode::BusinessLogic => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a validation error from field-level failures.
    ///
    /// The top-level message is the first field's message.
    pub fn invalid_fields(errors: &[ValidationError]) -> Self {
        let field_errors: Vec<FieldError> = errors
            .iter()
            .map(|e| FieldError {
                field: e.field().to_string(),
                message: e.to_string(),
            })
            .collect();

        let message = field_errors
            .first()
            .map(|f| f.message.clone())
            .unwrap_or_else(|| "Invalid request".to_string());

        ApiError {
            code: ErrorCode::ValidationError,
            message,
            field_errors,
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::conflict(format!("{} '{}' already exists", field, value))
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(number) => ApiError::not_found("Product", &number),
            CoreError::InvalidProductNumber(number) => {
                tracing::error!(%number, "Stored product number is not numeric");
                ApiError::internal("Stored product number is corrupt")
            }
            err @ CoreError::AmountOverflow(_) => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::DateOutOfRange(date) => {
                ApiError::validation(format!("Date out of range: {}", date))
            }
            CoreError::Validation(e) => ApiError::invalid_fields(std::slice::from_ref(&e)),
            CoreError::InvalidInput(errors) => ApiError::invalid_fields(&errors),
        }
    }
}

/// Converts mail client failures to API errors.
impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        tracing::warn!(error = %err, "Mail client failed");
        ApiError::new(ErrorCode::MailError, err.to_string())
    }
}

/// Malformed or mistyped JSON bodies are validation errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - One field failing one rule                     │
//! │                                                                         │
//! │  kiosk-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  kiosk-server errors (in app)                                          │
//! │  ├── MailError        - Mail client transport failures                 │
//! │  └── ApiError         - What the HTTP client sees (serialized)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON body              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product number, field name)
//! 3. Errors are enum variants, never String
//! 4. Validation messages are user-facing and end with a period

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - An order names a product number that was never registered
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A stored product number is not a decimal integer.
    ///
    /// ## When This Occurs
    /// - The latest product row was written by hand with a number like "A01"
    /// - The next number would not fit in an `i64`
    #[error("Invalid product number: {0}")]
    InvalidProductNumber(String),

    /// A sum of prices does not fit in the money range.
    ///
    /// ## When This Occurs
    /// - An order total or a daily sales total passes `i64::MAX` won
    #[error("{0} exceeds the largest supported amount")]
    AmountOverflow(&'static str),

    /// A report date has no following day to close its time window.
    #[error("Date out of range: {0}")]
    DateOutOfRange(chrono::NaiveDate),

    /// A single validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Several fields failed validation at once.
    ///
    /// ## When This Occurs
    /// - A request body misses more than one required field
    ///
    /// Every failure is kept so the caller can show one message per field.
    #[error("Validation failed: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{message}")]
    Required {
        field: &'static str,
        message: &'static str,
    },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{message}")]
    MustBePositive {
        field: &'static str,
        message: &'static str,
    },

    /// Value is above its upper bound.
    #[error("{field} must be at most {max}.")]
    TooLarge { field: &'static str, max: i64 },

    /// Invalid format (e.g. an email address without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the request field that failed, as it appears on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBePositive { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::InvalidFormat { field, .. } => *field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for dealership-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dealership-core errors (this file)                                    │
//! │  ├── CoreError        - Lookup failures on referenced records          │
//! │  └── ValidationError  - Input coercion / range failures                │
//! │                                                                         │
//! │  dealership-db errors (separate crate)                                 │
//! │  └── DbError          - Connection and statement failures              │
//! │                                                                         │
//! │  DataAccess facade collapses all of them to None / empty / false       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// A record referenced by the caller does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No make with this name (case-insensitive).
    #[error("Make not found: {0}")]
    MakeNotFound(String),

    /// No model with this name under the resolved make.
    ///
    /// ## When This Occurs
    /// - The model name does not exist at all
    /// - The model exists but belongs to a different make
    #[error("Model not found: {model} (make {make})")]
    ModelNotFound { make: String, model: String },

    /// No customer with this identifier (case-insensitive).
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// No salesperson with this username (case-insensitive).
    #[error("Salesperson not found: {0}")]
    SalespersonNotFound(String),

    /// No car sale with this identifier.
    #[error("Car sale not found: {0}")]
    CarSaleNotFound(i32),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any statement runs; an operation that fails validation
/// never contacts the database.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The text could not be coerced into the expected type.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Date is after today.
    #[error("{field} must not be in the future")]
    InFuture { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

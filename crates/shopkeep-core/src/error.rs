//! # Error Types
//!
//! Domain-specific error types for shopkeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopkeep-core errors (this file)                                       │
//! │  ├── CoreError        - Aggregation-level failures                      │
//! │  └── ValidationError  - Record/field validation failures                │
//! │                                                                         │
//! │  Storage/host errors live outside this crate.                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → host app error → user message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (record kind, id, field)
//! 3. Errors are enum variants, never String
//! 4. Every error from this crate is recoverable by the caller; the core
//!    holds no state that could be left inconsistent

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Aggregation and ledger errors.
///
/// An aggregation call is all-or-nothing: if any single record fails
/// validation the whole call returns [`CoreError::InvalidRecord`] naming the
/// offender, rather than a partially-computed total.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record inside an aggregation input failed validation.
    ///
    /// ## When This Occurs
    /// - A movement with an empty product id or zero quantity
    /// - A sale-like movement carrying a positive quantity
    /// - An expense with a non-positive amount
    /// - A purchase with a non-positive quantity
    #[error("{kind} record {id} is invalid: {source}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Record and field validation errors.
///
/// These occur when a record does not meet the shape contracts of the
/// ledger, or when an enum value arrives as an unknown string. Unknown
/// values always fail loudly here; there is no silent fallthrough.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be negative (e.g., a sale movement's quantity).
    #[error("{field} must be negative")]
    MustBeNegative { field: String },

    /// Invalid format or shape (e.g., zero movement quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (unknown enum string).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

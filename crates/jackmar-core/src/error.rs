//! # Error Types
//!
//! Domain-specific error types for jackmar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  jackmar-core errors (this file)                                       │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  jackmar-receipt errors (separate crate)                               │
//! │  └── ExportError      - Receipt generation / save failures             │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── AppError         - What the UI sees (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → alert                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
///
/// Every variant leaves the cart untouched: an operation either succeeds
/// completely or fails with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Checkout was requested while the cart holds no items.
    ///
    /// ## User Workflow
    /// ```text
    /// Click Checkout (cart empty)
    ///      │
    ///      ▼
    /// EmptyCartCheckout
    ///      │
    ///      ▼
    /// UI shows: "Your cart is empty!"
    /// ```
    #[error("Your cart is empty!")]
    EmptyCartCheckout,

    /// A positional index did not address an existing line.
    #[error("No cart line at index {index} (cart has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Quantity below 1 on add.
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Negative unit price on add.
    #[error("Price cannot be negative, got {cents} cents")]
    InvalidPrice { cents: i64 },

    /// The item count would no longer fit in an `i64`.
    #[error("Quantity for {id} is too large")]
    QuantityOverflow { id: String },

    /// A line total or the cart total would no longer fit in `i64` cents.
    #[error("Adding {id} would make the cart total too large")]
    TotalOverflow { id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while checking text and numeric input before it reaches the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a malformed price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate product id in a catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "No cart line at index 4 (cart has 2 lines)");

        assert_eq!(CoreError::EmptyCartCheckout.to_string(), "Your cart is empty!");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "A".to_string(),
        };
        assert_eq!(err.to_string(), "product id 'A' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

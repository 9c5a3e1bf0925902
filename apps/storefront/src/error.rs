//! # App Error Type
//!
//! Unified error type for storefront operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  UI event (click / console line)                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  CartController operation → Result<T, AppError>                  │  │
//! │  │         │                                                        │  │
//! │  │  Cart rule broken? ──── CoreError::IndexOutOfRange ──┐          │  │
//! │  │         │                                            ▼          │  │
//! │  │  Export failed?    ──── ExportError::Write ──────► AppError ───►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The controller also raises an alert on the render sink, so the user   │
//! │  sees the message even when the caller ignores the Result.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `AppError` is `Serialize` so a web front end receives
//! `{ "code": "EMPTY_CART", "message": "Your cart is empty!" }`.

use jackmar_core::{CoreError, ValidationError};
use jackmar_receipt::ExportError;
use serde::Serialize;

/// Error returned from storefront operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Checkout with nothing in the cart
    EmptyCart,

    /// Unknown product id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed (bad index, quantity or total overflow)
    CartError,

    /// Receipt could not be produced; the cart was kept
    ExportError,

    /// Configuration or catalog could not be loaded
    ConfigError,

    /// Console input could not be understood
    InvalidCommand,

    /// Anything else (terminal I/O, ...)
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an invalid command error.
    pub fn command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts cart errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::EmptyCartCheckout => ErrorCode::EmptyCart,
            CoreError::IndexOutOfRange { .. }
            | CoreError::QuantityOverflow { .. }
            | CoreError::TotalOverflow { .. } => ErrorCode::CartError,
            CoreError::InvalidQuantity { .. }
            | CoreError::InvalidPrice { .. }
            | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts export errors to app errors.
impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        tracing::error!(error = %err, "Receipt export failed");
        AppError::new(
            ErrorCode::ExportError,
            format!("Could not create your receipt: {}", err),
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err: AppError = CoreError::EmptyCartCheckout.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Your cart is empty!");

        let err: AppError = CoreError::IndexOutOfRange { index: 3, len: 1 }.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: AppError = CoreError::InvalidQuantity { quantity: 0 }.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_export_error_code() {
        let err: AppError = ExportError::Unavailable("offline".into()).into();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(err.message.contains("offline"));
    }

    #[test]
    fn test_serializes_for_frontend() {
        let err = AppError::not_found("Product", "zz");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: zz");
    }
}

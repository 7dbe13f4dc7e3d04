//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Purchase / order failures                      │
//! │  └── ValidationError  - Bad constructor or purchase arguments          │
//! │                                                                         │
//! │  stockroom-cli errors (app crate)                                      │
//! │  └── CliError         - Config, catalog and I/O failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidArgument → CliError → user  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. The core never logs or retries; the caller decides what to print

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by product purchases and store orders.
///
/// Every failure is returned to the immediate caller. A failed
/// [`Product::buy`](crate::Product::buy) leaves the product untouched; a
/// failed [`Store::order`](crate::Store::order) keeps whatever earlier lines
/// already applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// An argument broke a validation rule (empty name, negative price,
    /// non-positive purchase quantity, out-of-range percent, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Purchase attempted on a deactivated or sold-out product.
    #[error("Product is not active: {name}")]
    Inactive { name: String },

    /// Requested quantity exceeds the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Order line (qty: 20)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Widget", available: 10, requested: 20 }
    ///      │
    ///      ▼
    /// CLI shows: "Not enough Widget available: available 10, requested 20"
    /// ```
    #[error("Not enough {name} available: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Requested quantity exceeds a capped product's per-order maximum.
    #[error("Per-order limit for {name} is {maximum}, requested {requested}")]
    LimitExceeded {
        name: String,
        maximum: i64,
        requested: i64,
    },

    /// Order line references a product that is not a member of the store.
    #[error("Product not available in this store: {0}")]
    ProductNotFound(ProductId),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by constructors and setters before any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
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
        let err = CoreError::InsufficientStock {
            name: "Widget".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Not enough Widget available: available 3, requested 5"
        );

        let err = CoreError::LimitExceeded {
            name: "Shipping".to_string(),
            maximum: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Per-order limit for Shipping is 1, requested 2"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "percent must be between 0 and 100");

        let err = ValidationError::NotFinite {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be a finite number");
    }

    #[test]
    fn test_validation_converts_to_invalid_argument() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidArgument(_)));
        assert_eq!(core_err.to_string(), "Invalid argument: quantity must be positive");
    }
}

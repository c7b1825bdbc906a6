//! # Error Types
//!
//! The single error taxonomy of shop-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shop-core (this file)                                                  │
//! │  └── ValidationError  - every rejected operation                        │
//! │                                                                         │
//! │  shop-cli (app)                                                         │
//! │  └── AppError         - wraps ValidationError, I/O, JSON, arguments     │
//! │                                                                         │
//! │  Flow: ValidationError → AppError → exit code + message                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (equipment id, field name)
//! 3. Errors are enum variants, never String
//! 4. A rejected operation has no side effects

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Why an operation was rejected.
///
/// Raised synchronously at the point of the call. There is no retry and no
/// partial success: the caller can assume nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required string is missing or blank.
    #[error("{field} must not be blank")]
    Required { field: String },

    /// Value must be greater than zero.
    #[error("{field} must be > 0")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must be >= 0")]
    MustNotBeNegative { field: String },

    /// Input could not be parsed (price text, equipment type name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Order submitted with nothing in the cart.
    #[error("cart must not be empty")]
    EmptyCart,

    /// Cart references an id the catalog does not know.
    #[error("equipment not found in catalog: {0}")]
    EquipmentNotFound(String),

    /// Rental requested for equipment that can only be bought.
    #[error("equipment not eligible for rental: {0}")]
    NotRentalEligible(String),

    /// Not enough units on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart { M1: 3 }
    ///      │
    ///      ▼
    /// Check stock: available=2
    ///      │
    ///      ▼
    /// InsufficientStock { id: "M1", available: 2, requested: 3 }
    /// ```
    #[error("insufficient stock for {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: String,
        available: i64,
        requested: i64,
    },

    /// Quantity or monetary arithmetic left the representable range.
    #[error("{field} is too large")]
    Overflow { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_not_be_negative(field: &str) -> Self {
        ValidationError::MustNotBeNegative {
            field: field.to_string(),
        }
    }

    pub(crate) fn overflow(field: &str) -> Self {
        ValidationError::Overflow {
            field: field.to_string(),
        }
    }

    /// Stable machine-readable reason tag.
    ///
    /// Used in logs and by front ends that branch on the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "required",
            ValidationError::MustBePositive { .. } => "must_be_positive",
            ValidationError::MustNotBeNegative { .. } => "must_not_be_negative",
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::EmptyCart => "empty_cart",
            ValidationError::EquipmentNotFound(_) => "equipment_not_found",
            ValidationError::NotRentalEligible(_) => "not_rental_eligible",
            ValidationError::InsufficientStock { .. } => "insufficient_stock",
            ValidationError::Overflow { .. } => "overflow",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InsufficientStock {
            id: "M1".to_string(),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for M1: available 2, requested 3"
        );

        assert_eq!(
            ValidationError::required("id").to_string(),
            "id must not be blank"
        );
        assert_eq!(
            ValidationError::must_be_positive("quantity").to_string(),
            "quantity must be > 0"
        );
        assert_eq!(
            ValidationError::EquipmentNotFound("X".to_string()).to_string(),
            "equipment not found in catalog: X"
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            ValidationError::required("id"),
            ValidationError::must_be_positive("quantity"),
            ValidationError::must_not_be_negative("price"),
            ValidationError::InvalidFormat {
                field: "type".to_string(),
                reason: "unknown".to_string(),
            },
            ValidationError::EmptyCart,
            ValidationError::EquipmentNotFound("X".to_string()),
            ValidationError::NotRentalEligible("M1".to_string()),
            ValidationError::InsufficientStock {
                id: "M1".to_string(),
                available: 0,
                requested: 1,
            },
            ValidationError::overflow("quantity"),
        ];

        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}

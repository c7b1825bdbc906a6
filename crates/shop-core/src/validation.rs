//! # Validation Module
//!
//! Input checks shared by equipment construction, the cart and the order
//! service.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (shop-cli)                                          │
//! │  └── Argument parsing (ID=QTY, file format)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity construction (Equipment::new, Cart::add_item)          │
//! │  └── THIS MODULE: field rules                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order planning (OrderPlan::build)                             │
//! │  └── Catalog existence, rental eligibility, stock                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::validation::{validate_id, validate_quantity};
//!
//! assert!(validate_id("B1").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// String Validators
// =============================================================================

/// Validates an equipment id.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    Ok(())
}

/// Validates an equipment name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price before it is rounded to money.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::must_not_be_negative("price"));
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::must_not_be_negative("stock"));
    }

    Ok(())
}

/// Validates a requested quantity.
///
/// ## User Workflow
/// ```text
/// add_item(board, 0)
///      │
///      ▼
/// validate_quantity(0) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → Error: "quantity must be > 0"
///      │
///      └── OK → accumulate into cart
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("B1").is_ok());
        assert_eq!(validate_id(""), Err(ValidationError::required("id")));
        assert_eq!(validate_id("   "), Err(ValidationError::required("id")));
        assert_eq!(validate_id("\t\n"), Err(ValidationError::required("id")));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Board X").is_ok());
        assert_eq!(validate_name(" "), Err(ValidationError::required("name")));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(50000, 2)).is_ok());
        assert_eq!(
            validate_price(Decimal::new(-1, 3)),
            Err(ValidationError::must_not_be_negative("price"))
        );
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(10).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
    }
}

//! # shop-core: Pure Business Logic for the Shop
//!
//! Catalog, cart and order processing for a windsurf shop that sells and
//! rents equipment. Every function is an in-memory computation: no files,
//! no network, no async.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    shop-cli (catalog files, receipts)                   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ equipment │  │   cart    │  │  pricing  │  │   order   │  │   │
//! │  │   │  catalog  │  │ CartLine  │  │ subtotal  │  │ OrderPlan │  │   │
//! │  │   │           │  │           │  │           │  │ Receipt   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   money   │  │validation │  │  shared   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`equipment`] - Equipment entity and its serde record
//! - [`catalog`] - id → Equipment mapping owned by the caller
//! - [`cart`] - Requested quantities per equipment id
//! - [`pricing`] - Shared subtotal computation
//! - [`order`] - Two-pass validate/commit and receipts
//! - [`shared`] - Mutex-guarded catalog for concurrent callers
//! - [`money`] - Decimal money, half-up rounding, deposit rate
//! - [`error`] - `ValidationError`
//! - [`validation`] - Field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use shop_core::{Cart, Catalog, Equipment, EquipmentType, OrderService};
//!
//! let board = Equipment::new("B1", "Board X", Decimal::new(50000, 2), 10, EquipmentType::Board, true)?;
//! let mut cart = Cart::new();
//! cart.add_item(&board, 1)?;
//!
//! let mut catalog: Catalog = [board].into_iter().collect();
//! let receipt = OrderService::new(&mut catalog).process_order(&cart, true)?;
//!
//! assert_eq!(receipt.deposit().to_string(), "50.00");
//! assert_eq!(receipt.total().to_string(), "550.00");
//! assert_eq!(catalog.stock_of("B1"), Some(9));
//! # Ok::<(), shop_core::ValidationError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod equipment;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod shared;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use equipment::{Equipment, EquipmentRecord};
pub use error::{ValidationError, ValidationResult};
pub use money::{DepositRate, Money, RENTAL_DEPOSIT_RATE};
pub use order::{OrderPlan, OrderReceipt, OrderService, ReceiptLine};
pub use shared::SharedCatalog;
pub use types::*;

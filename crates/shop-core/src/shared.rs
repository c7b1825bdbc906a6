//! # Shared Catalog
//!
//! A catalog that several threads can order from.
//!
//! ## Thread Safety
//! The catalog is wrapped in `Arc<Mutex<T>>` and the lock is held for the
//! whole of one order: planning and commit see the same stock, so no
//! other order can slip in between the two passes.
//!
//! ```text
//! thread A ── lock ── plan ── apply ── unlock
//! thread B ─────────── wait ─────────────────── lock ── plan ── apply ── unlock
//! ```

use std::sync::{Arc, Mutex};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::ValidationResult;
use crate::money::{DepositRate, Money, RENTAL_DEPOSIT_RATE};
use crate::order::{OrderReceipt, OrderService};

/// Cloneable handle to one catalog behind a mutex.
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    catalog: Arc<Mutex<Catalog>>,
    deposit_rate: DepositRate,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_deposit_rate(catalog, RENTAL_DEPOSIT_RATE)
    }

    pub fn with_deposit_rate(catalog: Catalog, deposit_rate: DepositRate) -> Self {
        SharedCatalog {
            catalog: Arc::new(Mutex::new(catalog)),
            deposit_rate,
        }
    }

    /// Executes a function with read access to the catalog.
    ///
    /// ## Usage
    /// ```rust
    /// use shop_core::{Catalog, SharedCatalog};
    ///
    /// let shared = SharedCatalog::new(Catalog::new());
    /// assert!(shared.with_catalog(|c| c.is_empty()));
    /// ```
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&catalog)
    }

    /// Processes one order while holding the lock for both passes.
    pub fn process_order(&self, cart: &Cart, rental: bool) -> ValidationResult<OrderReceipt> {
        let mut catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        let mut service = OrderService::with_deposit_rate(&mut catalog, self.deposit_rate);
        service.process_order(cart, rental)
    }

    /// Quotes a cart against the current catalog.
    pub fn estimate_subtotal(&self, cart: &Cart) -> ValidationResult<Money> {
        self.with_catalog(|catalog| cart.estimate_subtotal(catalog))
    }
}

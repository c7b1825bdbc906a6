//! # Cart
//!
//! Accumulates requested quantities per equipment id.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller Action             Method                  Cart Change          │
//! │  ─────────────             ──────                  ───────────          │
//! │  Pick equipment ─────────► add_item() ───────────► lines[id] += qty     │
//! │  Drop a line ────────────► remove_item() ────────► lines.remove(id)     │
//! │  Start over ─────────────► clear() ──────────────► lines.clear()        │
//! │  Ask for a quote ────────► estimate_subtotal() ──► (read only)          │
//! │  Check out ──────────────► OrderService::process_order(&cart, rental)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::equipment::Equipment;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::pricing;
use crate::validation::validate_quantity;

/// One `(equipment id, quantity)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub equipment_id: String,
    pub quantity: i64,
}

/// Requested items for one order attempt.
///
/// ## Invariants
/// - Lines are unique by `equipment_id` (adding the same id sums quantities)
/// - Every stored quantity is >= 1
/// - Lines keep insertion order; only receipts and display care about it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `qty` of `equipment`, summing with any quantity already present.
    ///
    /// ## Errors
    /// - `MustBePositive` if `qty <= 0`
    /// - `Overflow` if the summed quantity does not fit in an `i64`
    pub fn add_item(&mut self, equipment: &Equipment, qty: i64) -> ValidationResult<()> {
        validate_quantity(qty)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.equipment_id == equipment.id())
        {
            line.quantity = line
                .quantity
                .checked_add(qty)
                .ok_or_else(|| ValidationError::overflow("quantity"))?;
            return Ok(());
        }

        self.lines.push(CartLine {
            equipment_id: equipment.id().to_string(),
            quantity: qty,
        });
        Ok(())
    }

    /// Removes the line for `id`, returning its quantity.
    pub fn remove_item(&mut self, id: &str) -> Option<i64> {
        let index = self.lines.iter().position(|l| l.equipment_id == id)?;
        Some(self.lines.remove(index).quantity)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Accumulated quantity for `id`.
    pub fn quantity(&self, id: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|l| l.equipment_id == id)
            .map(|l| l.quantity)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct equipment ids.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines. `Overflow` when the sum does not fit in an `i64`.
    pub fn total_quantity(&self) -> ValidationResult<i64> {
        self.lines.iter().try_fold(0i64, |total, line| {
            total
                .checked_add(line.quantity)
                .ok_or_else(|| ValidationError::overflow("quantity"))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quotes the cart against a catalog without touching stock.
    ///
    /// ## Errors
    /// `EquipmentNotFound` if any line's id is missing from `catalog`.
    pub fn estimate_subtotal(&self, catalog: &Catalog) -> ValidationResult<Money> {
        pricing::subtotal(catalog, &self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentType;
    use rust_decimal::Decimal;

    fn board() -> Equipment {
        Equipment::new("B1", "Board X", Decimal::new(50000, 2), 10, EquipmentType::Board, true).unwrap()
    }

    fn sail() -> Equipment {
        Equipment::new("S1", "Sail A", Decimal::new(20000, 2), 5, EquipmentType::Sail, true).unwrap()
    }

    #[test]
    fn test_add_item_accumulates_by_id() {
        let mut cart = Cart::new();
        cart.add_item(&board(), 1).unwrap();
        cart.add_item(&board(), 2).unwrap();

        assert!(!cart.is_empty());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity("B1"), Some(3));
    }

    #[test]
    fn test_add_item_sum_matches_arguments() {
        let mut cart = Cart::new();
        let quantities = [4, 1, 7, 2, 9];
        for qty in quantities {
            cart.add_item(&sail(), qty).unwrap();
        }
        assert_eq!(cart.quantity("S1"), Some(quantities.iter().sum()));
    }

    #[test]
    fn test_add_item_validates_quantity() {
        let mut cart = Cart::new();
        assert!(cart.add_item(&board(), 0).is_err());
        assert!(cart.add_item(&board(), -5).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_overflow_keeps_previous_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&board(), i64::MAX).unwrap();
        let err = cart.add_item(&board(), 1).unwrap_err();
        assert_eq!(err.code(), "overflow");
        assert_eq!(cart.quantity("B1"), Some(i64::MAX));
    }

    #[test]
    fn test_total_quantity_overflow_across_ids() {
        let mut cart = Cart::new();
        cart.add_item(&board(), i64::MAX).unwrap();
        cart.add_item(&sail(), 1).unwrap();

        let err = cart.total_quantity().unwrap_err();
        assert_eq!(err, ValidationError::Overflow { field: "quantity".to_string() });
        assert_eq!(Cart::new().total_quantity(), Ok(0));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&sail(), 1).unwrap();
        cart.add_item(&board(), 1).unwrap();
        cart.add_item(&sail(), 1).unwrap();

        let ids: Vec<_> = cart.lines().iter().map(|l| l.equipment_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "B1"]);
        assert_eq!(cart.total_quantity(), Ok(3));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(&board(), 2).unwrap();
        cart.add_item(&sail(), 1).unwrap();

        assert_eq!(cart.remove_item("B1"), Some(2));
        assert_eq!(cart.remove_item("B1"), None);
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_estimate_subtotal_sums_line_totals() {
        let catalog: Catalog = [board(), sail()].into_iter().collect();
        let mut cart = Cart::new();
        cart.add_item(&board(), 1).unwrap(); // 500
        cart.add_item(&sail(), 3).unwrap(); // 600

        let subtotal = cart.estimate_subtotal(&catalog).unwrap();
        assert_eq!(subtotal.to_string(), "1100.00");
        // no mutation
        assert_eq!(catalog.stock_of("B1"), Some(10));
        assert_eq!(catalog.stock_of("S1"), Some(5));
    }

    #[test]
    fn test_estimate_subtotal_fails_when_id_missing() {
        let mut catalog: Catalog = [board(), sail()].into_iter().collect();
        let mut cart = Cart::new();
        cart.add_item(&board(), 1).unwrap();
        cart.add_item(&sail(), 1).unwrap();
        catalog.remove("S1");

        let err = cart.estimate_subtotal(&catalog).unwrap_err();
        assert_eq!(err, ValidationError::EquipmentNotFound("S1".to_string()));
    }
}

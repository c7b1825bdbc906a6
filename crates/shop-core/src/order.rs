//! # Order Processing
//!
//! Validates a cart against the catalog and commits it, all or nothing.
//!
//! ## Two-Pass Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  process_order(cart, rental)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PASS 1: OrderPlan::build (reads the catalog only)                      │
//! │   ├── cart empty?                  → EmptyCart                          │
//! │   └── for each line, in cart order:                                     │
//! │        ├── id in catalog?          → EquipmentNotFound                  │
//! │        ├── qty > 0?                → MustBePositive                     │
//! │        ├── rental && !eligible?    → NotRentalEligible                  │
//! │        ├── qty <= stock?           → InsufficientStock                  │
//! │        └── subtotal += price × qty                                      │
//! │   subtotal = round(subtotal)                                            │
//! │   deposit  = rental ? round(subtotal × rate) : 0.00                     │
//! │   total    = round(subtotal + deposit)                                  │
//! │       │                                                                 │
//! │       ▼  (any error above: catalog untouched)                           │
//! │  PASS 2: OrderPlan::apply                                               │
//! │   ├── re-check every line against the catalog                           │
//! │   ├── decrease_stock(qty) for each line                                 │
//! │   └── issue OrderReceipt { status: OK, ... }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Nothing here locks. The catalog must not be changed by anyone else
//! between the start and the end of one `process_order` call. Callers that
//! process orders from several threads use
//! [`SharedCatalog`](crate::shared::SharedCatalog), which holds one lock for
//! both passes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::equipment::Equipment;
use crate::error::{ValidationError, ValidationResult};
use crate::money::{DepositRate, Money, RENTAL_DEPOSIT_RATE};
use crate::pricing;
use crate::types::ReceiptStatus;

// =============================================================================
// Receipt
// =============================================================================

/// One committed `(equipment id, quantity)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub equipment_id: String,
    pub quantity: i64,
}

/// Immutable result of a committed order.
///
/// Only issued on success, so `status` is always [`ReceiptStatus::Ok`].
/// `total == subtotal + deposit`, and `deposit` is zero unless `rental`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    receipt_id: Uuid,
    status: ReceiptStatus,
    lines: Vec<ReceiptLine>,
    subtotal: Money,
    deposit: Money,
    total: Money,
    rental: bool,
    issued_at: DateTime<Utc>,
}

impl OrderReceipt {
    pub fn receipt_id(&self) -> Uuid {
        self.receipt_id
    }

    pub fn status(&self) -> ReceiptStatus {
        self.status
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn deposit(&self) -> Money {
        self.deposit
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_rental(&self) -> bool {
        self.rental
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

// =============================================================================
// Order Plan
// =============================================================================

/// The outcome of pass 1: what will be committed and what it costs.
///
/// Building a plan never mutates anything. Applying it is the only step
/// that changes stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    lines: Vec<ReceiptLine>,
    subtotal: Money,
    deposit: Money,
    total: Money,
    rental: bool,
}

/// Per-line checks shared by planning and commit.
fn check_line<'c>(
    catalog: &'c Catalog,
    id: &str,
    qty: i64,
    rental: bool,
) -> ValidationResult<&'c Equipment> {
    let equipment = pricing::lookup(catalog, id)?;

    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: format!("quantity for {}", id),
        });
    }

    if rental && !equipment.is_rental_eligible() {
        return Err(ValidationError::NotRentalEligible(id.to_string()));
    }

    if !equipment.has_stock_for(qty) {
        return Err(ValidationError::InsufficientStock {
            id: id.to_string(),
            available: equipment.stock(),
            requested: qty,
        });
    }

    Ok(equipment)
}

impl OrderPlan {
    /// Pass 1: validates every cart line and prices the order.
    ///
    /// The deposit is taken from the already rounded subtotal, then the
    /// total is rounded again.
    pub fn build(
        catalog: &Catalog,
        cart: &Cart,
        rental: bool,
        deposit_rate: DepositRate,
    ) -> ValidationResult<Self> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(cart.len());
        let mut subtotal = Money::zero();

        for line in cart.lines() {
            let equipment = check_line(catalog, &line.equipment_id, line.quantity, rental)?;
            subtotal = pricing::accumulate(subtotal, pricing::line_total(equipment, line.quantity)?)?;
            lines.push(ReceiptLine {
                equipment_id: line.equipment_id.clone(),
                quantity: line.quantity,
            });
        }

        let deposit = if rental {
            subtotal
                .checked_percentage(deposit_rate)
                .ok_or_else(|| ValidationError::overflow("deposit"))?
        } else {
            Money::zero()
        };
        let total = subtotal
            .checked_add(deposit)
            .ok_or_else(|| ValidationError::overflow("total"))?;

        debug!(
            lines = lines.len(),
            rental,
            %subtotal,
            %deposit,
            %total,
            "order planned"
        );

        Ok(OrderPlan {
            lines,
            subtotal,
            deposit,
            total,
            rental,
        })
    }

    /// Pass 2: decreases stock for every line and issues the receipt.
    ///
    /// Every line is checked again before the first decrement, so a catalog
    /// that changed since [`OrderPlan::build`] is rejected untouched instead
    /// of being partly committed.
    pub fn apply(self, catalog: &mut Catalog) -> ValidationResult<OrderReceipt> {
        for line in &self.lines {
            check_line(catalog, &line.equipment_id, line.quantity, self.rental)?;
        }

        for line in &self.lines {
            catalog
                .get_mut(&line.equipment_id)
                .ok_or_else(|| ValidationError::EquipmentNotFound(line.equipment_id.clone()))?
                .decrease_stock(line.quantity)?;
        }

        let receipt = OrderReceipt {
            receipt_id: Uuid::new_v4(),
            status: ReceiptStatus::Ok,
            lines: self.lines,
            subtotal: self.subtotal,
            deposit: self.deposit,
            total: self.total,
            rental: self.rental,
            issued_at: Utc::now(),
        };

        info!(
            receipt_id = %receipt.receipt_id,
            rental = receipt.rental,
            total = %receipt.total,
            "order committed"
        );

        Ok(receipt)
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn deposit(&self) -> Money {
        self.deposit
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_rental(&self) -> bool {
        self.rental
    }
}

// =============================================================================
// Order Service
// =============================================================================

/// Processes carts against a catalog it borrows but does not own.
pub struct OrderService<'a> {
    catalog: &'a mut Catalog,
    deposit_rate: DepositRate,
}

impl<'a> OrderService<'a> {
    /// Service with the standard 10% rental deposit.
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self::with_deposit_rate(catalog, RENTAL_DEPOSIT_RATE)
    }

    pub fn with_deposit_rate(catalog: &'a mut Catalog, deposit_rate: DepositRate) -> Self {
        OrderService {
            catalog,
            deposit_rate,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &*self.catalog
    }

    pub fn deposit_rate(&self) -> DepositRate {
        self.deposit_rate
    }

    /// Runs pass 1 only; nothing is committed.
    pub fn plan_order(&self, cart: &Cart, rental: bool) -> ValidationResult<OrderPlan> {
        OrderPlan::build(&*self.catalog, cart, rental, self.deposit_rate)
    }

    /// Validates and commits `cart`.
    ///
    /// ## Errors
    /// Any [`ValidationError`] from pass 1. On error no stock has changed.
    pub fn process_order(&mut self, cart: &Cart, rental: bool) -> ValidationResult<OrderReceipt> {
        let result = self
            .plan_order(cart, rental)
            .and_then(|plan| plan.apply(&mut *self.catalog));

        if let Err(err) = &result {
            warn!(code = err.code(), rental, error = %err, "order rejected");
        }

        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn board() -> Equipment {
        Equipment::new("B1", "Board X", dec("500.00"), 10, EquipmentType::Board, true).unwrap()
    }

    fn mast() -> Equipment {
        Equipment::new("M1", "Mast Z", dec("150.00"), 2, EquipmentType::Mast, false).unwrap()
    }

    fn sail() -> Equipment {
        Equipment::new("S1", "Sail A", dec("200.00"), 5, EquipmentType::Sail, true).unwrap()
    }

    fn catalog() -> Catalog {
        [board(), mast(), sail()].into_iter().collect()
    }

    fn cart_of(items: &[(Equipment, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (equipment, qty) in items {
            cart.add_item(equipment, *qty).unwrap();
        }
        cart
    }

    #[test]
    fn test_purchase_decreases_stock_and_returns_receipt() {
        let mut catalog = catalog();
        let mut service = OrderService::new(&mut catalog);

        let receipt = service.process_order(&cart_of(&[(board(), 2)]), false).unwrap();

        assert_eq!(receipt.status(), ReceiptStatus::Ok);
        assert!(!receipt.is_rental());
        assert_eq!(receipt.subtotal().to_string(), "1000.00");
        assert_eq!(receipt.deposit().to_string(), "0.00");
        assert_eq!(receipt.total().to_string(), "1000.00");
        assert_eq!(
            receipt.lines(),
            &[ReceiptLine {
                equipment_id: "B1".to_string(),
                quantity: 2
            }]
        );
        assert_eq!(service.catalog().stock_of("B1"), Some(8));
    }

    #[test]
    fn test_rental_applies_deposit_and_decreases_stock() {
        let mut catalog = catalog();
        let receipt = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(board(), 1)]), true)
            .unwrap();

        assert!(receipt.is_rental());
        assert_eq!(receipt.subtotal().to_string(), "500.00");
        assert_eq!(receipt.deposit().to_string(), "50.00");
        assert_eq!(receipt.total().to_string(), "550.00");
        assert_eq!(catalog.stock_of("B1"), Some(9));
    }

    #[test]
    fn test_insufficient_stock_leaves_stock_unchanged() {
        let mut catalog = catalog();
        let err = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(mast(), 3)]), false)
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::InsufficientStock {
                id: "M1".to_string(),
                available: 2,
                requested: 3,
            }
        );
        assert_eq!(catalog.stock_of("M1"), Some(2));
    }

    #[test]
    fn test_rental_not_eligible() {
        let mut catalog = catalog();
        let err = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(mast(), 1)]), true)
            .unwrap_err();

        assert_eq!(err, ValidationError::NotRentalEligible("M1".to_string()));
        assert_eq!(catalog.stock_of("M1"), Some(2));
    }

    #[test]
    fn test_missing_equipment_changes_nothing() {
        let mut catalog = catalog();
        let before = catalog.stock_snapshot();
        let ghost = Equipment::new("X", "Temp", dec("1.00"), 1, EquipmentType::Board, true).unwrap();

        let err = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(board(), 1), (ghost, 1)]), false)
            .unwrap_err();

        assert_eq!(err, ValidationError::EquipmentNotFound("X".to_string()));
        assert_eq!(catalog.stock_snapshot(), before);
    }

    #[test]
    fn test_subtotal_that_would_lose_cents_is_rejected() {
        let pricey = Equipment::new(
            "G1",
            "Gold Board",
            dec("12345678901234567.89"),
            200_000_000_000,
            EquipmentType::Board,
            true,
        )
        .unwrap();
        let mut catalog: Catalog = [pricey.clone()].into_iter().collect();

        let err = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(pricey, 100_000_000_001)]), false)
            .unwrap_err();

        assert_eq!(err, ValidationError::Overflow { field: "line total".to_string() });
        assert_eq!(catalog.stock_of("G1"), Some(200_000_000_000));
    }

    #[test]
    fn test_empty_cart() {
        let mut catalog = catalog();
        let err = OrderService::new(&mut catalog)
            .process_order(&Cart::new(), false)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyCart);
    }

    #[test]
    fn test_late_failure_never_partially_commits() {
        let mut catalog = catalog();
        let before = catalog.stock_snapshot();

        // board and sail are fine, the mast line fails last
        let cart = cart_of(&[(board(), 3), (sail(), 5), (mast(), 1)]);
        let err = OrderService::new(&mut catalog)
            .process_order(&cart, true)
            .unwrap_err();

        assert_eq!(err.code(), "not_rental_eligible");
        assert_eq!(catalog.stock_snapshot(), before);
    }

    #[test]
    fn test_first_failing_line_in_cart_order_wins() {
        let mut catalog = catalog();
        // sail over stock comes before the non-rentable mast
        let cart = cart_of(&[(sail(), 6), (mast(), 1)]);
        let err = OrderService::new(&mut catalog)
            .process_order(&cart, true)
            .unwrap_err();
        assert_eq!(err.code(), "insufficient_stock");
    }

    #[test]
    fn test_multi_line_receipt_keeps_cart_order() {
        let mut catalog = catalog();
        let cart = cart_of(&[(sail(), 2), (board(), 1), (mast(), 2)]);
        let receipt = OrderService::new(&mut catalog)
            .process_order(&cart, false)
            .unwrap();

        let ids: Vec<_> = receipt.lines().iter().map(|l| l.equipment_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "B1", "M1"]);
        assert_eq!(receipt.total().to_string(), "1200.00");
        assert_eq!(
            catalog.stock_snapshot(),
            vec![("B1".to_string(), 9), ("M1".to_string(), 0), ("S1".to_string(), 3)]
        );
    }

    #[test]
    fn test_deposit_uses_rounded_subtotal() {
        // 3 × 11.115 → price rounds to 11.12, subtotal 33.36, deposit 3.336 → 3.34
        let item = Equipment::new("F1", "Fin", dec("11.115"), 5, EquipmentType::Boom, true).unwrap();
        let mut catalog: Catalog = [item.clone()].into_iter().collect();

        let receipt = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(item, 3)]), true)
            .unwrap();

        assert_eq!(receipt.subtotal().to_string(), "33.36");
        assert_eq!(receipt.deposit().to_string(), "3.34");
        assert_eq!(receipt.total().to_string(), "36.70");
    }

    #[test]
    fn test_custom_deposit_rate() {
        let mut catalog = catalog();
        let receipt = OrderService::with_deposit_rate(&mut catalog, DepositRate::from_bps(2500))
            .process_order(&cart_of(&[(board(), 1)]), true)
            .unwrap();
        assert_eq!(receipt.deposit().to_string(), "125.00");
        assert_eq!(receipt.total().to_string(), "625.00");
    }

    #[test]
    fn test_total_is_subtotal_plus_deposit() {
        let mut catalog = catalog();
        let mut service = OrderService::new(&mut catalog);
        for (cart, rental) in [
            (cart_of(&[(board(), 1), (sail(), 1)]), true),
            (cart_of(&[(mast(), 1)]), false),
            (cart_of(&[(sail(), 3)]), true),
        ] {
            let receipt = service.process_order(&cart, rental).unwrap();
            assert_eq!(Some(receipt.total()), receipt.subtotal().checked_add(receipt.deposit()));
            assert_eq!(receipt.deposit().is_zero(), !rental);
        }
    }

    #[test]
    fn test_plan_order_does_not_commit() {
        let mut catalog = catalog();
        let service = OrderService::new(&mut catalog);
        let plan = service.plan_order(&cart_of(&[(board(), 4)]), false).unwrap();

        assert_eq!(plan.total().to_string(), "2000.00");
        assert_eq!(service.catalog().stock_of("B1"), Some(10));
    }

    #[test]
    fn test_apply_rechecks_stock_changed_after_planning() {
        let mut catalog = catalog();
        let cart = cart_of(&[(sail(), 1), (board(), 8)]);
        let plan = OrderPlan::build(&catalog, &cart, false, RENTAL_DEPOSIT_RATE).unwrap();

        // another actor sells 5 boards between the two passes
        catalog.get_mut("B1").unwrap().decrease_stock(5).unwrap();
        let before = catalog.stock_snapshot();

        let err = plan.apply(&mut catalog).unwrap_err();
        assert_eq!(err.code(), "insufficient_stock");
        assert_eq!(catalog.stock_snapshot(), before);
    }

    #[test]
    fn test_receipt_json_shape() {
        let mut catalog = catalog();
        let receipt = OrderService::new(&mut catalog)
            .process_order(&cart_of(&[(board(), 1)]), true)
            .unwrap();

        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["status"], "OK");
        assert_eq!(value["subtotal"], "500.00");
        assert_eq!(value["deposit"], "50.00");
        assert_eq!(value["total"], "550.00");
        assert_eq!(value["rental"], true);
        assert_eq!(value["lines"][0]["equipmentId"], "B1");
        assert_eq!(value["lines"][0]["quantity"], 1);
    }

    #[test]
    fn test_receipts_get_distinct_ids() {
        let mut catalog = catalog();
        let mut service = OrderService::new(&mut catalog);
        let a = service.process_order(&cart_of(&[(board(), 1)]), false).unwrap();
        let b = service.process_order(&cart_of(&[(board(), 1)]), false).unwrap();
        assert_ne!(a.receipt_id(), b.receipt_id());
        assert!(b.issued_at() >= a.issued_at());
    }
}

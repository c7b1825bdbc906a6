//! # Pricing
//!
//! The one place that turns `(id, qty)` lines into money. Both
//! [`Cart::estimate_subtotal`](crate::cart::Cart::estimate_subtotal) and
//! order planning price through here, so a quote and a processed order can
//! never disagree.

use crate::cart::CartLine;
use crate::catalog::Catalog;
use crate::equipment::Equipment;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Finds `id` in the catalog or fails with `EquipmentNotFound`.
pub fn lookup<'c>(catalog: &'c Catalog, id: &str) -> ValidationResult<&'c Equipment> {
    catalog
        .get(id)
        .ok_or_else(|| ValidationError::EquipmentNotFound(id.to_string()))
}

/// `price × qty` for one line.
pub fn line_total(equipment: &Equipment, qty: i64) -> ValidationResult<Money> {
    equipment
        .price()
        .multiply_quantity(qty)
        .ok_or_else(|| ValidationError::overflow("line total"))
}

/// Adds a line total to a running subtotal.
pub fn accumulate(subtotal: Money, line: Money) -> ValidationResult<Money> {
    subtotal
        .checked_add(line)
        .ok_or_else(|| ValidationError::overflow("subtotal"))
}

/// Sum of `price × qty` over `lines`, exact at 2 decimals.
///
/// Pure: reads the catalog, never mutates it.
///
/// ## Errors
/// `EquipmentNotFound` for the first line whose id is not in the catalog.
pub fn subtotal(catalog: &Catalog, lines: &[CartLine]) -> ValidationResult<Money> {
    let mut subtotal = Money::zero();
    for line in lines {
        let equipment = lookup(catalog, &line.equipment_id)?;
        subtotal = accumulate(subtotal, line_total(equipment, line.quantity)?)?;
    }
    Ok(subtotal)
}

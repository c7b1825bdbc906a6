//! # Equipment
//!
//! A catalog item: immutable identity and pricing, plus a stock level that
//! only [`Equipment::decrease_stock`] can change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::EquipmentType;
use crate::validation::{validate_id, validate_name, validate_price, validate_quantity, validate_stock};

/// A piece of equipment available for sale or rental.
///
/// ## Invariants
/// - `id` and `name` are never blank
/// - `price` is >= 0 and carries exactly 2 decimals
/// - `stock` is never negative
/// - Equality and hashing use `id` only
///
/// Deserialization goes through [`EquipmentRecord`], so a value read from a
/// file is validated exactly like one built with [`Equipment::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EquipmentRecord", into = "EquipmentRecord")]
pub struct Equipment {
    id: String,
    name: String,
    price: Money,
    stock: i64,
    equipment_type: EquipmentType,
    rental_eligible: bool,
}

impl Equipment {
    /// Creates validated equipment.
    ///
    /// The price is rounded half-up to 2 decimals after the sign check, so
    /// `-0.001` is rejected rather than rounded to zero.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use shop_core::{Equipment, EquipmentType};
    ///
    /// let board = Equipment::new("B1", "Board X", Decimal::new(5000, 1), 10, EquipmentType::Board, true)
    ///     .unwrap();
    /// assert_eq!(board.price().to_string(), "500.00");
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        stock: i64,
        equipment_type: EquipmentType,
        rental_eligible: bool,
    ) -> ValidationResult<Self> {
        let id = id.into();
        let name = name.into();

        validate_id(&id)?;
        validate_name(&name)?;
        validate_price(price)?;
        validate_stock(stock)?;
        let price = Money::from_decimal(price).ok_or_else(|| ValidationError::overflow("price"))?;

        Ok(Equipment {
            id,
            name,
            price,
            stock,
            equipment_type,
            rental_eligible,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    #[inline]
    pub fn equipment_type(&self) -> EquipmentType {
        self.equipment_type
    }

    #[inline]
    pub fn is_rental_eligible(&self) -> bool {
        self.rental_eligible
    }

    /// Whether `qty` units can be taken from stock right now.
    pub fn has_stock_for(&self, qty: i64) -> bool {
        qty <= self.stock
    }

    /// Removes `qty` units from stock.
    ///
    /// ## Errors
    /// - `MustBePositive` if `qty <= 0`
    /// - `InsufficientStock` if `qty` exceeds the current stock
    ///
    /// Stock is untouched when an error is returned.
    pub fn decrease_stock(&mut self, qty: i64) -> ValidationResult<()> {
        validate_quantity(qty)?;

        if !self.has_stock_for(qty) {
            return Err(ValidationError::InsufficientStock {
                id: self.id.clone(),
                available: self.stock,
                requested: qty,
            });
        }

        self.stock -= qty;
        Ok(())
    }
}

impl PartialEq for Equipment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Equipment {}

impl Hash for Equipment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' ({}) price={} stock={}{}",
            self.id,
            self.name,
            self.equipment_type,
            self.price,
            self.stock,
            if self.rental_eligible { " rentable" } else { "" }
        )
    }
}

// =============================================================================
// Equipment Record (serde DTO)
// =============================================================================

/// Unvalidated wire shape of [`Equipment`].
///
/// Catalog files are lists of these:
/// ```json
/// { "id": "B1", "name": "Board X", "price": "500.00", "stock": 10,
///   "type": "BOARD", "rentalEligible": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[serde(default)]
    pub rental_eligible: bool,
}

impl TryFrom<EquipmentRecord> for Equipment {
    type Error = ValidationError;

    fn try_from(record: EquipmentRecord) -> ValidationResult<Self> {
        Equipment::new(
            record.id,
            record.name,
            record.price,
            record.stock,
            record.equipment_type,
            record.rental_eligible,
        )
    }
}

impl From<Equipment> for EquipmentRecord {
    fn from(equipment: Equipment) -> Self {
        EquipmentRecord {
            id: equipment.id,
            name: equipment.name,
            price: equipment.price.amount(),
            stock: equipment.stock,
            equipment_type: equipment.equipment_type,
            rental_eligible: equipment.rental_eligible,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

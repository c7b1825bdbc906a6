//! # Catalog
//!
//! The caller-owned mapping from equipment id to [`Equipment`].
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller ──owns──► Catalog ◄──&──────── Cart::estimate_subtotal          │
//! │                      ▲                                                  │
//! │                      └────&mut─────── OrderService (borrows, never owns)│
//! │                                                                         │
//! │  Entries are only mutated through Equipment::decrease_stock, and only   │
//! │  from inside this crate (order commit).                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::btree_map::{self, BTreeMap};

use crate::equipment::{Equipment, EquipmentRecord};
use crate::error::{ValidationError, ValidationResult};

/// Equipment keyed by id, iterated in id order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<String, Equipment>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Builds a catalog from unvalidated records.
    ///
    /// Fails on the first invalid record or on a repeated id.
    pub fn from_records<I>(records: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = EquipmentRecord>,
    {
        let mut catalog = Catalog::new();
        for record in records {
            let equipment = Equipment::try_from(record)?;
            if catalog.contains(equipment.id()) {
                return Err(ValidationError::InvalidFormat {
                    field: "id".to_string(),
                    reason: format!("duplicate equipment id '{}'", equipment.id()),
                });
            }
            catalog.insert(equipment);
        }
        Ok(catalog)
    }

    /// Adds or replaces an entry, returning the replaced one.
    pub fn insert(&mut self, equipment: Equipment) -> Option<Equipment> {
        self.items.insert(equipment.id().to_string(), equipment)
    }

    pub fn remove(&mut self, id: &str) -> Option<Equipment> {
        self.items.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Equipment> {
        self.items.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Equipment> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Current stock of `id`, if present.
    pub fn stock_of(&self, id: &str) -> Option<i64> {
        self.get(id).map(Equipment::stock)
    }

    /// `(id, stock)` for every entry, in id order.
    pub fn stock_snapshot(&self) -> Vec<(String, i64)> {
        self.iter()
            .map(|eq| (eq.id().to_string(), eq.stock()))
            .collect()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Equipment> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Equipment> for Catalog {
    /// Later entries replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = Equipment>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for equipment in iter {
            catalog.insert(equipment);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Equipment;
    type IntoIter = btree_map::Values<'a, String, Equipment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

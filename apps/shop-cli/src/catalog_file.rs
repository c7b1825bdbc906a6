//! # Catalog Loading
//!
//! Reads the catalog from a JSON file, or falls back to the built-in
//! stock list.
//!
//! ## File Format
//! ```json
//! [
//!   { "id": "B1", "name": "Board X", "price": "500.00", "stock": 10,
//!     "type": "BOARD", "rentalEligible": true }
//! ]
//! ```
//! Prices may also be JSON numbers; strings avoid any float detour.

use rust_decimal::Decimal;
use shop_core::{Catalog, EquipmentRecord, EquipmentType};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Built-in catalog: (id, name, price in cents, stock, type, rentable).
const DEFAULT_EQUIPMENT: &[(&str, &str, i64, i64, EquipmentType, bool)] = &[
    ("B1", "Freeride Board 130L", 50_000, 10, EquipmentType::Board, true),
    ("B2", "Wave Board 85L", 72_000, 3, EquipmentType::Board, true),
    ("S1", "Freeride Sail 6.5", 20_000, 5, EquipmentType::Sail, true),
    ("S2", "Race Sail 7.8", 61_050, 2, EquipmentType::Sail, false),
    ("M1", "Carbon Mast 460", 15_000, 2, EquipmentType::Mast, false),
    ("M2", "Epoxy Mast 430", 8_999, 6, EquipmentType::Mast, true),
    ("O1", "Aluminium Boom 150-200", 12_550, 4, EquipmentType::Boom, true),
];

/// The built-in catalog used when no file is configured.
pub fn default_catalog() -> AppResult<Catalog> {
    let records = DEFAULT_EQUIPMENT
        .iter()
        .map(|&(id, name, cents, stock, equipment_type, rental_eligible)| EquipmentRecord {
            id: id.to_string(),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            stock,
            equipment_type,
            rental_eligible,
        });

    Ok(Catalog::from_records(records)?)
}

/// Parses catalog JSON text.
pub fn parse_catalog(json: &str, path: &Path) -> AppResult<Catalog> {
    let records: Vec<EquipmentRecord> = serde_json::from_str(json).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(records = records.len(), ?path, "catalog file parsed");

    Ok(Catalog::from_records(records)?)
}

/// Reads and validates a catalog file.
pub fn load_catalog(path: &Path) -> AppResult<Catalog> {
    let json = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&json, path)?;
    info!(items = catalog.len(), ?path, "catalog loaded");
    Ok(catalog)
}

/// Loads `path` when given, the built-in catalog otherwise.
pub fn load_or_default(path: Option<&Path>) -> AppResult<Catalog> {
    match path {
        Some(path) => load_catalog(path),
        None => {
            info!("no catalog file configured, using built-in catalog");
            default_catalog()
        }
    }
}

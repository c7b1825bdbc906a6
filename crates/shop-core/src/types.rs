//! # Domain Types
//!
//! Small enums shared by the entities.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  EquipmentType  │   │  ReceiptStatus  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Board          │   │  Ok             │                             │
//! │  │  Sail           │   └─────────────────┘                             │
//! │  │  Mast           │                                                    │
//! │  │  Boom           │   Failures are errors, so a receipt is only       │
//! │  └─────────────────┘   ever issued with status OK.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Equipment Type
// =============================================================================

/// Kind of windsurf equipment in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentType {
    Board,
    Sail,
    Mast,
    Boom,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 4] = [
        EquipmentType::Board,
        EquipmentType::Sail,
        EquipmentType::Mast,
        EquipmentType::Boom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Board => "BOARD",
            EquipmentType::Sail => "SAIL",
            EquipmentType::Mast => "MAST",
            EquipmentType::Boom => "BOOM",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"board"` and `"BOARD"` both parse.
impl FromStr for EquipmentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EquipmentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "type".to_string(),
                reason: format!("unknown equipment type '{}'", wanted),
            })
    }
}

// =============================================================================
// Receipt Status
// =============================================================================

/// Status carried by an issued receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReceiptStatus {
    #[default]
    #[serde(rename = "OK")]
    Ok,
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptStatus::Ok => f.write_str("OK"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

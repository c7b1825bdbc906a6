//! # Configuration
//!
//! Settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--catalog`, `--deposit-rate-bps`)
//! 2. Environment variables (`SHOP_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup.

use serde::{Deserialize, Serialize};
use shop_core::{DepositRate, Money, RENTAL_DEPOSIT_RATE};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Printed at the top of receipts
    pub store_name: String,

    /// Currency symbol (for display only, no conversion)
    pub currency_symbol: String,

    /// Rental deposit in basis points (1000 = 10%)
    pub deposit_rate_bps: u32,

    /// Catalog JSON file; the built-in catalog is used when absent
    pub catalog_path: Option<PathBuf>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            store_name: "Windsurf Shop".to_string(),
            currency_symbol: "$".to_string(),
            deposit_rate_bps: RENTAL_DEPOSIT_RATE.bps(),
            catalog_path: None,
        }
    }
}

impl ShopConfig {
    /// Creates a ShopConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOP_STORE_NAME`: Override store name
    /// - `SHOP_CURRENCY_SYMBOL`: Override currency symbol
    /// - `SHOP_DEPOSIT_RATE_BPS`: Override deposit rate (e.g., "1500" for 15%)
    /// - `SHOP_CATALOG`: Path to a catalog JSON file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ShopConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ShopConfig::default();

        if let Some(store_name) = lookup("SHOP_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("SHOP_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(rate) = lookup("SHOP_DEPOSIT_RATE_BPS") {
            match rate.trim().parse::<u32>() {
                Ok(bps) => config.deposit_rate_bps = bps,
                Err(_) => warn!(value = %rate, "ignoring invalid SHOP_DEPOSIT_RATE_BPS"),
            }
        }

        if let Some(path) = lookup("SHOP_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        config
    }

    pub fn deposit_rate(&self) -> DepositRate {
        DepositRate::from_bps(self.deposit_rate_bps)
    }

    /// Formats money with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use shop_cli::config::ShopConfig;
    /// use shop_core::Money;
    ///
    /// let config = ShopConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(123_456)), "$1234.56");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, amount.amount().abs())
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

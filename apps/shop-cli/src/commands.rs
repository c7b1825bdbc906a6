//! # Commands
//!
//! One function per subcommand. Each writes to the given output so tests
//! can capture it.
//!
//! ## Order Lifecycle
//! ```text
//! --item B1=2 --item S1=1
//!      │
//!      ▼
//! build_cart() ──► Cart { B1: 2, S1: 1 }
//!      │
//!      ├── quote ──► Cart::estimate_subtotal        (no stock change)
//!      │
//!      └── order ──► OrderService::process_order    (stock decreases)
//!                          │
//!                          ▼
//!                    render_receipt() / JSON
//! ```

use serde::{Deserialize, Serialize};
use shop_core::{pricing, Cart, CartLine, Catalog, OrderReceipt, OrderService, ValidationResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ShopConfig;
use crate::error::{AppError, AppResult, ErrorCode};

/// Output format for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses an `ID=QTY` argument.
pub fn parse_item(raw: &str) -> Result<CartLine, String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", raw))?;
    let quantity = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("quantity in '{}' is not a whole number", raw))?;

    Ok(CartLine {
        equipment_id: id.trim().to_string(),
        quantity,
    })
}

/// Builds a cart from requested lines, resolving each id in the catalog.
pub fn build_cart(catalog: &Catalog, items: &[CartLine]) -> ValidationResult<Cart> {
    let mut cart = Cart::new();
    for item in items {
        let equipment = pricing::lookup(catalog, &item.equipment_id)?;
        cart.add_item(equipment, item.quantity)?;
    }
    Ok(cart)
}

// =============================================================================
// catalog
// =============================================================================

pub fn list_catalog(
    catalog: &Catalog,
    config: &ShopConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> AppResult<()> {
    match format {
        OutputFormat::Json => {
            let items: Vec<_> = catalog.iter().collect();
            writeln!(out, "{}", to_json(&items)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{:<6} {:<28} {:<6} {:>12} {:>6}  RENTAL", "ID", "NAME", "TYPE", "PRICE", "STOCK")?;
            for eq in catalog {
                writeln!(
                    out,
                    "{:<6} {:<28} {:<6} {:>12} {:>6}  {}",
                    eq.id(),
                    eq.name(),
                    eq.equipment_type(),
                    config.format_money(eq.price()),
                    eq.stock(),
                    if eq.is_rental_eligible() { "yes" } else { "no" }
                )?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// quote
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote<'a> {
    lines: &'a [CartLine],
    subtotal: shop_core::Money,
}

pub fn quote(
    catalog: &Catalog,
    items: &[CartLine],
    config: &ShopConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> AppResult<()> {
    let cart = build_cart(catalog, items)?;
    let subtotal = cart.estimate_subtotal(catalog)?;
    debug!(lines = cart.len(), %subtotal, "quote computed");

    match format {
        OutputFormat::Json => {
            let quote = Quote {
                lines: cart.lines(),
                subtotal,
            };
            writeln!(out, "{}", to_json(&quote)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Estimated subtotal: {}", config.format_money(subtotal))?;
        }
    }
    Ok(())
}

// =============================================================================
// order
// =============================================================================

pub fn order(
    catalog: &mut Catalog,
    items: &[CartLine],
    rental: bool,
    config: &ShopConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> AppResult<OrderReceipt> {
    let cart = build_cart(catalog, items)?;
    let receipt = OrderService::with_deposit_rate(catalog, config.deposit_rate()).process_order(&cart, rental)?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", to_json(&receipt)?)?,
        OutputFormat::Text => write!(out, "{}", render_receipt(&receipt, catalog, config))?,
    }
    Ok(receipt)
}

/// Human-readable receipt.
pub fn render_receipt(receipt: &OrderReceipt, catalog: &Catalog, config: &ShopConfig) -> String {
    let mut text = String::new();
    let rule = "-".repeat(48);

    text.push_str(&format!("{}\n", config.store_name));
    text.push_str(&format!(
        "Receipt {}  [{}] {}\n",
        receipt.receipt_id(),
        receipt.status(),
        if receipt.is_rental() { "RENTAL" } else { "PURCHASE" }
    ));
    text.push_str(&format!("{}\n", receipt.issued_at().format("%Y-%m-%d %H:%M:%S UTC")));
    text.push_str(&format!("{}\n", rule));

    for line in receipt.lines() {
        let name = catalog
            .get(&line.equipment_id)
            .map(|eq| eq.name().to_string())
            .unwrap_or_default();
        text.push_str(&format!("{:<6} {:<30} x{}\n", line.equipment_id, name, line.quantity));
    }

    text.push_str(&format!("{}\n", rule));
    text.push_str(&format!("{:<20}{:>28}\n", "Subtotal", config.format_money(receipt.subtotal())));
    if receipt.is_rental() {
        text.push_str(&format!(
            "{:<20}{:>28}\n",
            format!("Deposit ({})", config.deposit_rate()),
            config.format_money(receipt.deposit())
        ));
    }
    text.push_str(&format!("{:<20}{:>28}\n", "TOTAL", config.format_money(receipt.total())));
    text
}

// =============================================================================
// batch
// =============================================================================

/// One order in a batch file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrder {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub rental: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    Committed { receipt: OrderReceipt },
    Rejected { code: ErrorCode, message: String },
}

pub fn read_batch(path: &Path) -> AppResult<Vec<BatchOrder>> {
    let json = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs every order in sequence against one catalog.
///
/// A rejected order is reported and skipped; it never changes stock.
pub fn run_batch(catalog: &mut Catalog, orders: &[BatchOrder], config: &ShopConfig) -> Vec<BatchOutcome> {
    let mut service = OrderService::with_deposit_rate(catalog, config.deposit_rate());

    let outcomes: Vec<_> = orders
        .iter()
        .map(|order| {
            let result = build_cart(service.catalog(), &order.items)
                .and_then(|cart| service.process_order(&cart, order.rental));
            match result {
                Ok(receipt) => BatchOutcome::Committed { receipt },
                Err(err) => {
                    let err = AppError::from(err);
                    BatchOutcome::Rejected {
                        code: err.code(),
                        message: err.to_string(),
                    }
                }
            }
        })
        .collect();

    let committed = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Committed { .. }))
        .count();
    info!(orders = orders.len(), committed, "batch finished");
    outcomes
}

pub fn batch(
    catalog: &mut Catalog,
    path: &Path,
    config: &ShopConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> AppResult<Vec<BatchOutcome>> {
    let orders = read_batch(path)?;
    let outcomes = run_batch(catalog, &orders, config);

    match format {
        OutputFormat::Json => writeln!(out, "{}", to_json(&outcomes)?)?,
        OutputFormat::Text => {
            for (index, outcome) in outcomes.iter().enumerate() {
                match outcome {
                    BatchOutcome::Committed { receipt } => {
                        writeln!(out, "#{} committed", index + 1)?;
                        write!(out, "{}", render_receipt(receipt, catalog, config))?;
                    }
                    BatchOutcome::Rejected { code, message } => {
                        writeln!(out, "#{} rejected [{}]: {}", index + 1, code, message)?;
                    }
                }
            }
        }
    }
    Ok(outcomes)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|source| AppError::Json {
        path: "<stdout>".into(),
        source,
    })
}

//! # shop-cli
//!
//! Command-line front end over `shop-core`.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Load configuration (defaults → `SHOP_*` env → flags)
//! 3. Load the catalog (file or built-in)
//! 4. Dispatch the subcommand
//!
//! ## Usage
//! ```text
//! shop-cli catalog
//! shop-cli quote --item B1=1 --item S1=3
//! shop-cli order --item B1=1 --rental
//! shop-cli --json batch orders.json
//! ```

pub mod catalog_file;
pub mod commands;
pub mod config;
pub mod error;

use clap::{Parser, Subcommand};
use shop_core::CartLine;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::OutputFormat;
use crate::config::ShopConfig;
use crate::error::AppResult;

#[derive(Debug, Parser)]
#[command(name = "shop-cli", version, about = "Sell and rent windsurf equipment")]
pub struct Cli {
    /// Catalog JSON file (overrides SHOP_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Rental deposit in basis points (overrides SHOP_DEPOSIT_RATE_BPS)
    #[arg(long, global = true)]
    pub deposit_rate_bps: Option<u32>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog
    Catalog,

    /// Estimate the subtotal of a cart without ordering
    Quote {
        /// Requested line as ID=QTY (repeatable)
        #[arg(long = "item", value_parser = commands::parse_item, required = true)]
        items: Vec<CartLine>,
    },

    /// Process one order and print the receipt
    Order {
        /// Requested line as ID=QTY (repeatable)
        #[arg(long = "item", value_parser = commands::parse_item, required = true)]
        items: Vec<CartLine>,

        /// Rent instead of buy (adds the deposit)
        #[arg(long)]
        rental: bool,
    },

    /// Process a JSON file of orders in sequence
    Batch {
        /// File containing `[{ "items": [{"equipmentId", "quantity"}], "rental" }]`
        file: PathBuf,
    },
}

impl Cli {
    /// Applies flag overrides on top of the environment configuration.
    pub fn apply_overrides(&self, mut config: ShopConfig) -> ShopConfig {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if let Some(bps) = self.deposit_rate_bps {
            config.deposit_rate_bps = bps;
        }
        config
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Runs a parsed command line with the given configuration.
pub fn execute(cli: &Cli, config: &ShopConfig, out: &mut dyn Write) -> AppResult<()> {
    let mut catalog = catalog_file::load_or_default(config.catalog_path.as_deref())?;
    let format = cli.format();

    match &cli.command {
        Command::Catalog => commands::list_catalog(&catalog, config, format, out),
        Command::Quote { items } => commands::quote(&catalog, items, config, format, out),
        Command::Order { items, rental } => {
            commands::order(&mut catalog, items, *rental, config, format, out).map(|_| ())
        }
        Command::Batch { file } => commands::batch(&mut catalog, file, config, format, out).map(|_| ()),
    }
}

/// Entry point used by `main`: returns the process exit code.
pub fn run() -> i32 {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.apply_overrides(ShopConfig::from_env());
    info!(store = %config.store_name, deposit_bps = config.deposit_rate_bps, "starting shop-cli");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute(&cli, &config, &mut out) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error[{}]: {}", err.code(), err);
            err.exit_code()
        }
    }
}

/// Filter used when `RUST_LOG` is unset: info overall, debug for the shop crates.
pub const DEFAULT_LOG_FILTER: &str = "info,shop_core=debug,shop_cli=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=warn` - Only warnings and rejected orders
/// - `RUST_LOG=shop_core=trace` - Trace the core crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_command() {
        let cli = Cli::try_parse_from([
            "shop-cli", "order", "--item", "B1=2", "--item", "S1=1", "--rental",
        ])
        .unwrap();

        match cli.command {
            Command::Order { items, rental } => {
                assert!(rental);
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].equipment_id, "B1");
                assert_eq!(items[0].quantity, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_order_requires_items() {
        assert!(Cli::try_parse_from(["shop-cli", "order"]).is_err());
        assert!(Cli::try_parse_from(["shop-cli", "quote", "--item", "B1"]).is_err());
    }

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        // the core's "order planned" event is at debug level
        assert!(DEFAULT_LOG_FILTER.contains("shop_core=debug"));
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::try_parse_from([
            "shop-cli",
            "--catalog",
            "stock.json",
            "--deposit-rate-bps",
            "2000",
            "catalog",
        ])
        .unwrap();
        let config = cli.apply_overrides(ShopConfig::default());
        assert_eq!(config.catalog_path, Some(PathBuf::from("stock.json")));
        assert_eq!(config.deposit_rate_bps, 2000);
    }

    #[test]
    fn test_execute_order_on_builtin_catalog() {
        let cli = Cli::try_parse_from(["shop-cli", "--json", "order", "--item", "B1=2"]).unwrap();
        let mut out = Vec::new();
        execute(&cli, &ShopConfig::default(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], "1000.00");
        assert_eq!(value["rental"], false);
    }

    #[test]
    fn test_execute_rejects_unknown_id() {
        let cli = Cli::try_parse_from(["shop-cli", "quote", "--item", "GHOST=1"]).unwrap();
        let mut out = Vec::new();
        let err = execute(&cli, &ShopConfig::default(), &mut out).unwrap_err();
        assert_eq!(err.code(), error::ErrorCode::NotFound);
    }
}

//! # shop-cli Entry Point
//!
//! The actual setup is in lib.rs for better testability.

fn main() {
    std::process::exit(shop_cli::run());
}

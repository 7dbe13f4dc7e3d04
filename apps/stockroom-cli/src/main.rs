//! # Stockroom CLI
//!
//! Interactive store menu on top of `stockroom-core`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load configuration (STOCKROOM_* environment variables)             │
//! │  2. Initialize tracing (stderr, so logs never mix with the menu)       │
//! │  3. Build the store: JSON catalog if configured, built-in seed if not  │
//! │  4. Run the menu loop on stdin/stdout until the user quits             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod menu;

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::load()?;

    init_tracing(config.log_json);
    info!(store = %config.store_name, "Starting Stockroom");

    let mut store = match &config.catalog_path {
        Some(path) => {
            info!(?path, "Loading catalog");
            catalog::load_catalog(path)
                .with_context(|| format!("Could not build store from {}", path.display()))?
        }
        None => catalog::seed_store().context("Built-in catalog is invalid")?,
    };
    info!(
        products = store.len(),
        total_quantity = store.total_quantity(),
        "Store ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(&mut store, &config.store_name, stdin.lock(), stdout.lock())?;

    info!("Session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Show trace for stockroom only
/// - Default: warnings everywhere, info for stockroom
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockroom=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

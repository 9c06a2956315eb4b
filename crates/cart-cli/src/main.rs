//! # tara-cart
//!
//! Command-line cart backed by a file slot.
//!
//! ## Usage
//!
//! ```bash
//! export CART_CATALOG=config/products.toml
//! tara-cart add lavender-soap
//! tara-cart show
//! tara-cart checkout approve --payer Ada
//! ```

use cart_cli::{run, Command, ConsoleNotifier, FileStorage, HostConfig};
use cart_core::CartStore;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tara-cart")]
#[command(author, version, about = "Shopping cart in your terminal")]
struct Cli {
    /// Directory holding the cart file (overrides CART_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Cart settings TOML (overrides CART_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Product catalog TOML (overrides CART_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the cart
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let host = HostConfig::from_env().with_overrides(cli.data_dir, cli.config, cli.catalog);
    let config = host.load_cart_config()?;
    let catalog = host.load_catalog()?;
    info!(data_dir = %host.data_dir.display(), products = catalog.products.len(), "Host configured");

    let mut store =
        CartStore::load(FileStorage::new(&host.data_dir), config).with_notifier(ConsoleNotifier);

    let output = run(&mut store, &catalog, cli.command, cli.json).await?;
    print!("{}", output);
    Ok(())
}

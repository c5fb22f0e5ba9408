//! Bozor CLI - inspect and edit a cart file.
//!
//! # Usage
//!
//! ```bash
//! # Add three units of product 5
//! bozor add 5 --name Qatiq --price 12000 --qty 3
//!
//! # Add two boxes of six
//! bozor add-set 9 --name Suv --price 3000 --set-size 6 --sets 2
//!
//! # Print the cart
//! bozor show
//! bozor show --json
//!
//! # Erase everything
//! bozor clear
//! ```
//!
//! The cart file defaults to `.bozor/storage.json`; override it with
//! `--store` or `BOZOR_STORE_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bozor_cli::{CliConfig, Command, JsonFileStore, LogSurface, execute};
use bozor_core::CartStore;

#[derive(Parser)]
#[command(name = "bozor")]
#[command(author, version, about = "Bozor cart tools")]
struct Cli {
    /// Cart file, overrides `BOZOR_STORE_PATH`
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bozor_cli=info,bozor_core=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    let path = cli.store.unwrap_or_else(|| config.store_path.clone());

    let store = JsonFileStore::open(&path)?;
    tracing::debug!(path = %path.display(), "Opened cart file");

    let mut cart = CartStore::with_surface(store, LogSurface::new(), config.cart_config());
    execute(&mut cart, cli.command, &mut io::stdout().lock())?;
    cart.store_mut().flush()?;
    Ok(())
}

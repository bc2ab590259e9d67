//! # framequote CLI
//!
//! ```text
//! framequote quote --order order.json --catalog catalog.json [--config pricing.toml] [--pretty]
//! framequote quote --order - < order.json
//! framequote hash-secret <secret>
//! framequote update-config --new next.toml --secret <secret> [--config pricing.toml]
//! ```
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - catalog misses, tier fallbacks, totals
//! - Default: INFO level, written to stderr

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framequote_core::{calculate, CatalogIndex, OrderSpecification};
use framequote_store::{hash_admin_secret, settings, Argon2Policy, CatalogCache, ConfigStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

static CATALOG: CatalogCache = CatalogCache::new();

#[derive(Parser)]
#[command(name = "framequote")]
#[command(about = "Price custom picture-framing orders")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price an order and print the quote as JSON
    Quote {
        /// Order JSON file, or `-` for stdin
        #[arg(long)]
        order: String,

        /// Vendor catalog JSON (mouldings and supplies)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Pricing config TOML (defaults to the platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the quote
        #[arg(long)]
        pretty: bool,
    },
    /// Print an argon2 digest for `auth_secret_digest`
    HashSecret {
        secret: String,
    },
    /// Replace the pricing config, authorized by the admin secret
    UpdateConfig {
        /// TOML file with the new config
        #[arg(long)]
        new: PathBuf,

        /// Admin secret matching the current digest
        #[arg(long)]
        secret: String,

        /// Pricing config TOML to update (defaults to the platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Quote {
            order,
            catalog,
            config,
            pretty,
        } => run_quote(&order, catalog.as_deref(), config.as_deref(), pretty),
        Command::HashSecret { secret } => {
            println!("{}", hash_admin_secret(&secret)?);
            Ok(())
        }
        Command::UpdateConfig { new, secret, config } => {
            run_update_config(&new, &secret, config.as_deref())
        }
    }
}

/// Installs the stderr subscriber (`RUST_LOG`, default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_quote(order_src: &str, catalog: Option<&Path>, config: Option<&Path>, pretty: bool) -> Result<()> {
    let order_json = if order_src == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read order from stdin")?;
        buf
    } else {
        std::fs::read_to_string(order_src).with_context(|| format!("Failed to read order file {}", order_src))?
    };
    let order: OrderSpecification = serde_json::from_str(&order_json).context("Order is not valid JSON")?;

    let catalog = match catalog {
        Some(path) => CATALOG
            .get_or_load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => {
            info!("No catalog given, every SKU prices at defaults");
            Arc::new(CatalogIndex::empty())
        }
    };
    let store = ConfigStore::new(settings::load(config)?);

    let quote = calculate(&order, &*catalog, &store.snapshot());

    let out = if pretty {
        serde_json::to_string_pretty(&quote)?
    } else {
        serde_json::to_string(&quote)?
    };
    println!("{}", out);
    Ok(())
}

fn run_update_config(new_path: &Path, secret: &str, config: Option<&Path>) -> Result<()> {
    let contents = std::fs::read_to_string(new_path)
        .with_context(|| format!("Failed to read new config {}", new_path.display()))?;
    let new = settings::from_toml_str(&contents)?;

    let store = ConfigStore::new(settings::load(config)?);
    let updated = store.update(new, secret, &Argon2Policy)?;
    let path = settings::save(&updated, config)?;

    info!(?path, "Pricing config replaced");
    Ok(())
}

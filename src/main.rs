//! dialbook binary: wires config, logging, the HTTP record store, and
//! the interactive shell together.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use url::Url;

use dialbook::config::Config;
use dialbook::logging;
use dialbook::notify::Notifier;
use dialbook::roster::Roster;
use dialbook::shell::Shell;
use dialbook::store::HttpRecordStore;

/// Contact-list client for JSON record stores.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to a config file (default: ~/.dialbook/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record store base address; overrides config and environment.
    #[arg(long)]
    server: Option<String>,

    /// Collection name under the base address.
    #[arg(long)]
    collection: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(server) = args.server {
        config.store.base_url = server;
    }
    if let Some(collection) = args.collection {
        config.store.collection = collection;
    }

    let base = Url::parse(&config.store.base_url)
        .with_context(|| format!("invalid store base address: {}", config.store.base_url))?;
    let store = HttpRecordStore::new(
        &base,
        &config.store.collection,
        Duration::from_secs(config.store.timeout_secs),
    )?;

    info!(store = %base, collection = %config.store.collection, "starting");

    let notifier = Notifier::new();
    let mut roster = Roster::new(Arc::new(store), notifier.clone());
    roster.load().await;

    Shell::new(roster, notifier).run().await
}

//! `civic`: register, sign in and file civic-issue reports against a local
//! file store.

use anyhow::{Context, Result};
use bincode::config::Configuration;
use civic::{Client, Encoded};
use civic_fs::FileStore;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod config;

use config::{Config, Format};

fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let store = FileStore::new(&config.data_dir)
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;
    debug!(data_dir = %config.data_dir.display(), format = ?config.format, "opening store");

    match config.format {
        Format::Json => cli::run(&mut Client::open(store)?, config.command),
        Format::Binary => {
            let storage = Encoded::new(store, Configuration::default());
            cli::run(&mut Client::open(storage)?, config.command)
        }
    }
}

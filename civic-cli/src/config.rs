use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::cli::Command;

/// Report civic issues from the command line.
#[derive(Parser, Debug)]
#[command(name = "civic", version, about, long_about = None)]
pub struct Config {
    /// Directory holding one file per stored key
    #[arg(long, env = "CIVIC_DATA_DIR", default_value = "./civic-data")]
    pub data_dir: PathBuf,

    /// Value encoding used for stored records
    #[arg(long, env = "CIVIC_FORMAT", value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Log filter directive (e.g. `warn`, `civic=debug`)
    #[arg(long, env = "CIVIC_LOG", default_value = "warn")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// serde_json, readable on disk
    Json,
    /// bincode, compact
    Binary,
}

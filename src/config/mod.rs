//! Command line configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{observability::LoggingConfig, quote::QuoteArgs};

pub mod observability;
pub mod quote;

/// Cake quote CLI
#[derive(Debug, Parser)]
#[command(name = "cake-quote", about = "Custom cake price quotes", long_about = None)]
pub struct Cli {
    /// YAML price catalog; the built-in catalog is used when omitted
    #[arg(long, env = "CAKE_QUOTE_PRICES", global = true)]
    pub prices: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a cake
    Quote(QuoteArgs),

    /// List every option and its price
    Options,
}

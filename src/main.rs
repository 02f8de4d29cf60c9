//! Cake Quote CLI

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use cake_quote::{
    catalog::PriceCatalog,
    commands,
    config::{Cli, Command},
    fixtures::load_catalog,
    logging::init_subscriber,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_subscriber(&cli.logging)?;

    let catalog = match &cli.prices {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load price catalog {}", path.display()))?,
        None => PriceCatalog::default(),
    };

    let stdout = io::stdout();
    let handle = stdout.lock();

    match cli.command {
        Command::Quote(args) => commands::quote(&catalog, &args, handle)?,
        Command::Options => commands::options(&catalog, handle)?,
    }

    Ok(())
}

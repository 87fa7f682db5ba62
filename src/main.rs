//! folio - inspect a bilingual Markdown blog from the command line.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};

use folio::cli::{self, Cli};
use folio::{FolioConfig, Library, debug, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = FolioConfig::load(&cli.config, cli.root.as_deref())?;
    match &config.config_path {
        Some(path) => debug!("config"; "loaded {}", path.display()),
        None => debug!("config"; "no config file, using defaults"),
    }
    debug!("config"; "content root: {}", config.content_root().display());

    let library = Library::from_config(&config).context("Failed to set up the renderer")?;
    cli::run(&cli.command, &library).await
}

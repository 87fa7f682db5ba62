//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::content::Locale;

/// Inspect a bilingual Markdown blog: list posts, render them, estimate reading time
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Content root, overriding `[content] root` (relative to current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the posts of a locale, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Locale to list (en, zh)
        #[arg(short, long, default_value = "en")]
        locale: Locale,

        /// Print the posts as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Load one post and print it as JSON
    #[command(visible_alias = "s")]
    Show {
        /// Post slug (file name without extension)
        slug: String,

        /// Locale of the post (en, zh)
        #[arg(short, long, default_value = "en")]
        locale: Locale,

        /// Print only the rendered HTML body
        #[arg(long)]
        html: bool,
    },

    /// Print the locales a post is available in
    Locales {
        /// Post slug (file name without extension)
        slug: String,

        /// Candidate locale codes; unsupported codes are skipped
        #[arg(value_name = "CODE", default_values = ["en", "zh"])]
        codes: Vec<String>,
    },

    /// Estimate the reading time of a Markdown file
    #[command(visible_alias = "e")]
    Estimate {
        /// Markdown file, or `-` for stdin
        #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Locale whose counting rules apply (en, zh)
        #[arg(short, long, default_value = "en")]
        locale: Locale,
    },
}

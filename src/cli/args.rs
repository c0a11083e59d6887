use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ResolveOptions;

#[derive(Parser, Debug)]
#[command(name = "kotl")]
#[command(about = "Korean to English translator for tab-separated PLC text exports")]
#[command(version)]
pub struct Args {
    /// Provider name from config.toml (default: google)
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Translation cache file
    #[arg(long, global = true, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Keep translations in memory only
    #[arg(short = 'n', long, global = true, conflicts_with = "cache")]
    pub no_cache: bool,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            provider: self.provider.clone(),
            cache_path: self.cache.clone(),
            no_cache: self.no_cache,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a tab-separated text export line by line
    File {
        /// Input file (UTF-8 or UTF-16)
        input: PathBuf,

        /// Output file (default: <input stem>.en.txt), written as UTF-16
        output: Option<PathBuf>,
    },
    /// Translate a piece of text as a whole
    Text {
        /// Text to translate (reads --file or stdin if not provided)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short = 'f', long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Interactive translation session
    Chat,
    /// Inspect or delete the translation cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
    /// List translation providers
    Providers,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum CacheCommand {
    /// Show cache location and size
    Show,
    /// Delete the saved translation cache
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

/// Config-to-translator wiring shared by the subcommands.
pub mod context;

pub use args::{Args, CacheCommand, Command};
pub use context::AppContext;

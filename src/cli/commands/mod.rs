//! Subcommand implementations.

/// Cache inspection and deletion.
pub mod cache;

/// Interactive session command handler.
pub mod chat;

/// Batch file translation command handler.
pub mod file;

/// Provider listing command handler.
pub mod providers;

/// One-shot text translation command handler.
pub mod text;

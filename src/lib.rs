//! # kotl - Korean to English translation for PLC text exports
//!
//! `kotl` translates the Korean comments in tab-separated text exports
//! (`<id>\t<text>` per line) into English, keeping every other line
//! byte-for-byte. Translations are cached in a JSON file so repeated runs
//! cost no provider calls.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate an export; writes plc.en.txt as UTF-16
//! kotl file plc.txt
//!
//! # Translate a snippet
//! kotl text "모터 정지"
//!
//! # Interactive session with debounced translation
//! kotl chat
//!
//! # Delete the saved cache
//! kotl cache clear
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/kotl/config.toml`:
//!
//! ```toml
//! [kotl]
//! provider = "local"
//!
//! [providers.local]
//! kind = "openai"
//! endpoint = "http://localhost:11434"
//! model = "gemma3:12b"
//!
//! [batch]
//! chunk_size = 5
//! chunk_delay_ms = 300
//! ```

/// Chunked file translation with cooperative cancellation.
pub mod batch;

/// Source text to English translation cache.
pub mod cache;

/// Interactive session for the `chat` subcommand.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Selection and whole-buffer translation for interactive use.
pub mod interactive;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Translation providers and cache-aware resolution.
pub mod translation;

/// Terminal UI components (spinner, progress bar, colors, prompts).
pub mod ui;

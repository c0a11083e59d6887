//! Interactive translation session.
//!
//! Lines typed or pasted at the prompt form a text buffer that is
//! translated as a whole once typing pauses. Slash commands select lines,
//! run file jobs in the background and manage the cache.

/// Slash command parsing.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;

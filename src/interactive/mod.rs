//! Interactive translation of a text buffer.
//!
//! Two triggers: an explicit selection lookup, and a debounced whole-buffer
//! lookup scheduled after each edit.

mod buffer;
mod debounce;
mod translator;

pub use buffer::{LineRange, SelectionError, TextBuffer};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use translator::{DisplayUpdate, InteractiveTranslator, UNAVAILABLE_MESSAGE};

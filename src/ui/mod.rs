use anyhow::Result;
use inquire::{Confirm, InquireError};

mod spinner;
mod style;

pub use spinner::{JobProgress, Spinner};
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Yes/no prompt defaulting to "no".
///
/// Cancelling the prompt (Ctrl+C or Escape) prints a newline to clean up the
/// terminal and counts as "no".
pub fn confirm(message: &str, help: &str) -> Result<bool> {
    let answer = Confirm::new(message)
        .with_default(false)
        .with_help_message(help)
        .prompt();

    match answer {
        Ok(answer) => Ok(answer),
        Err(e) if is_prompt_cancelled(&e) => {
            println!();
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

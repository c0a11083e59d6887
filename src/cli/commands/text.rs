use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::cli::context::AppContext;
use crate::info;
use crate::input::InputReader;
use crate::interactive::{DisplayUpdate, UNAVAILABLE_MESSAGE};
use crate::translation::Resolution;
use crate::ui::Spinner;

pub struct TextOptions {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
}

/// Translates the whole text at once and prints the result to stdout.
pub async fn run_text(context: &AppContext, options: TextOptions) -> Result<()> {
    let source = match options.text {
        Some(text) => text,
        None => InputReader::read(options.file.as_deref())?,
    };

    let translator = context.interactive();
    let spinner = Spinner::new("Translating...");
    let update = translator.translate_buffer(&source).await;
    spinner.stop();

    match update {
        DisplayUpdate::Clear => bail!("Input is empty"),
        DisplayUpdate::Unchanged => {
            info!("No Korean text found, nothing to translate");
        }
        DisplayUpdate::Show(Resolution::Fallback { error }) => {
            return Err(anyhow::Error::new(error).context(UNAVAILABLE_MESSAGE));
        }
        DisplayUpdate::Show(resolution) => {
            println!("{}", resolution.text_or(UNAVAILABLE_MESSAGE));
        }
    }

    Ok(())
}

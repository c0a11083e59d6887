//! Cache inspection and deletion.

use anyhow::Result;

use crate::cache::{CacheStore, ClearOutcome, JsonCache, MemoryCache, clear_with_confirmation};
use crate::cli::CacheCommand;
use crate::config::{CacheLocation, ConfigManager, ResolveOptions, resolve_cache_location};
use crate::status;
use crate::ui::{self, Style};

pub const CLEAR_PROMPT: &str = "Are you sure you want to delete the saved translation cache?";
pub const CLEAR_WARNING: &str = "This action cannot be undone.";

pub fn run_cache(options: &ResolveOptions, command: CacheCommand) -> Result<()> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;
    let location = resolve_cache_location(options, &file_config)?;

    let mut cache: Box<dyn CacheStore> = match &location {
        CacheLocation::File(path) => Box::new(JsonCache::load(path)?),
        CacheLocation::Disabled => Box::new(MemoryCache::default()),
    };

    match command {
        CacheCommand::Show => print_summary(cache.as_ref()),
        CacheCommand::Clear { yes } => {
            let outcome = clear_with_confirmation(cache.as_mut(), || {
                if yes {
                    Ok(true)
                } else {
                    ui::confirm(CLEAR_PROMPT, CLEAR_WARNING)
                }
            })?;
            report_clear(outcome);
        }
    }

    Ok(())
}

pub fn print_summary(cache: &dyn CacheStore) {
    let Some(path) = cache.path() else {
        println!("Cache disabled, translations are kept in memory only.");
        return;
    };

    println!("{}", Style::header("Translation cache"));
    println!(
        "  {}     {}",
        Style::label("path"),
        Style::value(path.display())
    );
    if cache.has_persisted() {
        println!(
            "  {}  {}",
            Style::label("entries"),
            Style::value(cache.len())
        );
    } else {
        println!("  {}", Style::secondary("No cache found"));
    }
}

pub fn report_clear(outcome: ClearOutcome) {
    match outcome {
        ClearOutcome::NotFound => println!("No cache found. No cache file exists to delete."),
        ClearOutcome::Declined => status!("Cache left untouched."),
        ClearOutcome::Cleared => println!(
            "{} Translation cache has been deleted.",
            Style::success("✓")
        ),
    }
}

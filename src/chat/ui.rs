//! Chat mode UI components.

use crate::cli::AppContext;
use crate::config::CacheLocation;
use crate::interactive::{DisplayUpdate, TextBuffer};
use crate::ui::Style;

use super::command::SLASH_COMMANDS;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(provider_name: &str) {
    println!(
        "{} {} - Interactive Korean to English translation ({})",
        Style::header("kotl"),
        Style::version(format!("v{VERSION}")),
        Style::value(provider_name)
    );
    println!(
        "{}",
        Style::hint("Type or paste Korean text. /help for commands, Ctrl+C to quit.")
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_update(update: &DisplayUpdate) {
    match update {
        DisplayUpdate::Unchanged => {}
        DisplayUpdate::Clear => println!("{}", Style::hint("(translation cleared)")),
        DisplayUpdate::Show(resolution) => {
            let text = update.display_text().unwrap_or_default();
            if resolution.is_fallback() {
                println!("{}", Style::warning(text));
            } else {
                println!("{} {}", Style::secondary("EN"), Style::translation(text));
            }
            println!();
        }
    }
}

pub fn print_buffer(buffer: &TextBuffer) {
    if buffer.is_blank() {
        println!("{}", Style::hint("(buffer is empty)"));
        return;
    }

    let width = buffer.line_count().to_string().len();
    for (index, line) in buffer.as_str().lines().enumerate() {
        println!(
            "{} {line}",
            Style::secondary(format!("{:>width$}", index + 1))
        );
    }
    println!();
}

pub fn print_config(context: &AppContext) {
    let config = &context.config;

    println!("{}", Style::header("Configuration"));
    println!(
        "  {}   {}",
        Style::label("provider"),
        Style::value(&config.provider_name)
    );
    println!(
        "  {}       {}",
        Style::label("kind"),
        config.provider.kind.as_str()
    );
    println!(
        "  {}   {}",
        Style::label("endpoint"),
        Style::secondary(&config.provider.endpoint)
    );
    if let Some(model) = &config.provider.model {
        println!("  {}      {}", Style::label("model"), Style::value(model));
    }

    match &config.cache {
        CacheLocation::File(path) => println!(
            "  {}      {} ({} entries)",
            Style::label("cache"),
            Style::secondary(path.display()),
            context.resolver.cache().lock().len()
        ),
        CacheLocation::Disabled => println!(
            "  {}      {}",
            Style::label("cache"),
            Style::secondary("memory only")
        ),
    }

    println!(
        "  {}      {} lines, {} ms apart",
        Style::label("chunk"),
        config.pipeline.chunk_size,
        config.pipeline.chunk_delay.as_millis()
    );
    println!(
        "  {}   {} ms",
        Style::label("debounce"),
        config.debounce.as_millis()
    );
    println!();
}

pub fn print_help() {
    let width = SLASH_COMMANDS
        .iter()
        .map(|(cmd, _)| cmd.len())
        .max()
        .unwrap_or_default();

    println!("{}", Style::header("Available commands"));
    for (cmd, description) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{cmd:<width$}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, DEFAULT_PROVIDER, ProviderConfig, ProviderKind};
use crate::translation::DEFAULT_GOOGLE_ENDPOINT;
use crate::ui::Style;

/// Prints the built-in provider and every provider from config.toml.
pub fn print_providers() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    println!("{}", Style::header("Translation providers"));
    for (name, provider) in provider_entries(&config) {
        print_provider(&name, &provider, is_default(&config, &name));
    }

    if config.providers.is_empty() {
        println!();
        println!(
            "{}",
            Style::hint(format!(
                "Add providers to {}",
                manager.config_path().display()
            ))
        );
    }

    Ok(())
}

/// Configured providers sorted by name, plus the built-in `google` one
/// unless config.toml overrides it.
fn provider_entries(config: &ConfigFile) -> Vec<(String, ProviderConfig)> {
    let mut entries: Vec<_> = config
        .providers
        .iter()
        .map(|(name, provider)| (name.clone(), provider.clone()))
        .collect();

    if !config.providers.contains_key(DEFAULT_PROVIDER) {
        entries.push((DEFAULT_PROVIDER.to_string(), ProviderConfig::default()));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

fn is_default(config: &ConfigFile, name: &str) -> bool {
    config.kotl.provider.as_deref().unwrap_or(DEFAULT_PROVIDER) == name
}

fn print_provider(name: &str, provider: &ProviderConfig, is_default: bool) {
    let marker = if is_default {
        format!(" {}", Style::default_marker())
    } else {
        String::new()
    };
    println!("  {}{marker}", Style::value(name));

    println!(
        "    {}      {}",
        Style::label("kind"),
        provider.kind.as_str()
    );

    let endpoint = provider.endpoint.as_deref().unwrap_or(match provider.kind {
        ProviderKind::Google => DEFAULT_GOOGLE_ENDPOINT,
        ProviderKind::OpenAi => "(not set)",
    });
    println!(
        "    {}  {}",
        Style::label("endpoint"),
        Style::secondary(endpoint)
    );

    if let Some(model) = &provider.model {
        println!("    {}     {model}", Style::label("model"));
    }

    if provider.requires_api_key() {
        let status = if provider.get_api_key().is_some() {
            "(set)"
        } else {
            "(not set)"
        };
        println!("    {}   {status}", Style::label("api_key"));
    }
}

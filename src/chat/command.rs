use std::path::PathBuf;

use crate::interactive::LineRange;

/// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/select <a>[-<b>]", "Translate buffer lines a through b"),
    ("/show", "Show the buffer with line numbers"),
    ("/clear", "Empty the buffer"),
    ("/file <input> [output]", "Translate a text export in the background"),
    ("/cancel", "Cancel the running file job"),
    ("/cache", "Show cache location and size"),
    ("/clear-cache", "Delete the saved translation cache"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit the session"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Select(LineRange),
    Show,
    Clear,
    File {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    Cancel,
    Cache,
    ClearCache,
    Config,
    Help,
    Quit,
    /// A known command with bad arguments; holds the usage line.
    Usage(&'static str),
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// A line of source text, kept verbatim.
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Input::Empty;
    }

    trimmed.strip_prefix('/').map_or_else(
        || Input::Text(line.trim_end_matches(['\r', '\n']).to_string()),
        |cmd| Input::Command(parse_slash_command(cmd)),
    )
}

fn parse_slash_command(cmd: &str) -> SlashCommand {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    match parts.as_slice() {
        ["select", range] => range
            .parse()
            .map_or(SlashCommand::Usage("/select <a>[-<b>]"), SlashCommand::Select),
        ["select", ..] => SlashCommand::Usage("/select <a>[-<b>]"),
        ["show"] => SlashCommand::Show,
        ["clear"] => SlashCommand::Clear,
        ["file", input] => SlashCommand::File {
            input: PathBuf::from(input),
            output: None,
        },
        ["file", input, output] => SlashCommand::File {
            input: PathBuf::from(input),
            output: Some(PathBuf::from(output)),
        },
        ["file", ..] => SlashCommand::Usage("/file <input> [output]"),
        ["cancel"] => SlashCommand::Cancel,
        ["cache"] => SlashCommand::Cache,
        ["clear-cache"] => SlashCommand::ClearCache,
        ["config"] => SlashCommand::Config,
        ["help"] => SlashCommand::Help,
        ["quit" | "exit" | "q"] => SlashCommand::Quit,
        _ => SlashCommand::Unknown(parts.join(" ")),
    }
}

/// Parses the answer to a yes/no question; anything else means "no".
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

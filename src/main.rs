use anyhow::Result;
use clap::Parser;
use exitcode::ExitCode;
use tracing_subscriber::EnvFilter;

use kotl::cli::commands::{self, file, text};
use kotl::cli::{AppContext, Args, Command};
use kotl::output::{self, OutputConfig};
use kotl::ui::Style;

const LOG_ENV: &str = "KOTL_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("kotl=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    init_tracing();

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            1
        }
    };

    // The chat stdin reader blocks runtime shutdown until the next line.
    std::process::exit(code);
}

async fn run(args: Args) -> Result<ExitCode> {
    let options = args.resolve_options();

    match args.command {
        Command::File { input, output } => {
            let context = AppContext::load(&options)?;
            file::run_file(&context, file::FileOptions { input, output }).await
        }
        Command::Text { text: source, file: path } => {
            let context = AppContext::load(&options)?;
            let options = text::TextOptions {
                text: source,
                file: path,
            };
            text::run_text(&context, options).await?;
            Ok(exitcode::OK)
        }
        Command::Chat => {
            let context = AppContext::load(&options)?;
            commands::chat::run_chat(context).await?;
            Ok(exitcode::OK)
        }
        Command::Cache { command } => {
            commands::cache::run_cache(&options, command)?;
            Ok(exitcode::OK)
        }
        Command::Providers => {
            commands::providers::print_providers()?;
            Ok(exitcode::OK)
        }
    }
}

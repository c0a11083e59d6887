use anyhow::{Result, bail};
use exitcode::ExitCode;
use std::path::PathBuf;

use crate::batch::{BatchJob, JobEvent, JobReport, JobSlot, default_output_path, progress_fraction};
use crate::cli::context::AppContext;
use crate::ui::{JobProgress, Style};
use crate::{status, warn};

pub struct FileOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

/// Runs one batch job in the foreground. Ctrl+C cancels it at the next
/// chunk boundary.
pub async fn run_file(context: &AppContext, options: FileOptions) -> Result<ExitCode> {
    if !options.input.is_file() {
        eprintln!(
            "{} Input file not found: {}",
            Style::error("Error:"),
            options.input.display()
        );
        return Ok(exitcode::NOINPUT);
    }

    let output = options
        .output
        .unwrap_or_else(|| default_output_path(&options.input));

    let slot = JobSlot::new();
    let mut handle = BatchJob::spawn(context.pipeline(), options.input, output, &slot)?;
    let progress = JobProgress::new();
    let mut exit = exitcode::OK;
    let mut failure = None;

    loop {
        tokio::select! {
            event = handle.recv() => {
                let Some(event) = event else { break };
                match event {
                    JobEvent::Started { .. } => progress.set(0.0),
                    JobEvent::Progress { processed, total } => {
                        progress.set(progress_fraction(processed, total));
                    }
                    JobEvent::LineFailed { line, error } => progress.suspend(|| {
                        warn!("line {line}: translation failed, kept original text ({error})");
                    }),
                    JobEvent::Cancelled => {
                        progress.reset();
                        progress.finish();
                        status!("{}", Style::warning("Translation cancelled. No output was written."));
                        exit = exitcode::TEMPFAIL;
                    }
                    JobEvent::Completed(report) => {
                        progress.finish();
                        print_report(&report);
                    }
                    JobEvent::Failed(message) => {
                        progress.finish();
                        failure = Some(message);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                handle.cancel();
                progress.suspend(|| status!("Cancelling after the current chunk..."));
            }
        }
    }

    handle.join().await;

    if let Some(message) = failure {
        bail!(message);
    }

    Ok(exit)
}

fn print_report(report: &JobReport) {
    status!("{}", Style::success("Translation Complete"));
    status!(
        "  {}  {}",
        Style::label("lines"),
        Style::value(report.total_lines)
    );
    status!(
        "  {}  {} translated, {} cached, {} unchanged, {} failed",
        Style::label("stats"),
        report.stats.translated,
        report.stats.cache_hits,
        report.stats.passthrough,
        report.stats.fallbacks
    );
    println!("Saved to: {}", report.output.display());
}

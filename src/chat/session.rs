use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use super::command::{Input, SlashCommand, is_yes, parse_input};
use super::ui;
use crate::batch::{BatchJob, JobEvent, JobHandle, JobSlot, default_output_path, progress_fraction};
use crate::cache::{ClearOutcome, clear_with_confirmation};
use crate::cli::AppContext;
use crate::cli::commands::cache::{CLEAR_PROMPT, CLEAR_WARNING, print_summary, report_clear};
use crate::interactive::{DisplayUpdate, Debouncer, InteractiveTranslator, TextBuffer};
use crate::ui::{JobProgress, Style};
use crate::{status, warn};

struct RunningJob {
    handle: JobHandle,
    progress: JobProgress,
}

/// An interactive translation session.
///
/// Every typed line is appended to the buffer and restarts the debounce
/// timer; when typing pauses, the whole buffer is translated. Batch jobs
/// run on a background task and report back over a channel, so all
/// terminal output happens on the session loop.
pub struct ChatSession {
    context: AppContext,
    translator: InteractiveTranslator,
    buffer: TextBuffer,
    debouncer: Debouncer<String>,
    debounced: Option<UnboundedReceiver<String>>,
    slot: JobSlot,
    job: Option<RunningJob>,
    confirming_clear: bool,
}

impl ChatSession {
    pub fn new(context: AppContext) -> Self {
        let translator = context.interactive();
        let (debouncer, debounced) = Debouncer::new(context.config.debounce);

        Self {
            context,
            translator,
            buffer: TextBuffer::new(),
            debouncer,
            debounced: Some(debounced),
            slot: JobSlot::new(),
            job: None,
            confirming_clear: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(&self.context.config.provider_name);

        let mut debounced = self
            .debounced
            .take()
            .context("Chat session is already running")?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        break;
                    };
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Some(buffer) = debounced.recv() => {
                    if let Some(update) = self.translate_debounced(&buffer).await {
                        ui::print_update(&update);
                    }
                }
                event = next_job_event(&mut self.job) => self.handle_job_event(event),
                _ = tokio::signal::ctrl_c() => {
                    if let Some(job) = &self.job {
                        job.handle.cancel();
                        status!("Cancelling after the current chunk...");
                    } else {
                        println!();
                        break;
                    }
                }
            }
        }

        self.shutdown().await;
        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the session should end.
    async fn handle_line(&mut self, line: &str) -> bool {
        if self.confirming_clear {
            self.confirming_clear = false;
            self.finish_clear_cache(is_yes(line));
            return true;
        }

        match parse_input(line) {
            Input::Empty => true,
            Input::Text(text) => {
                self.buffer.push_line(&text);
                self.debouncer.schedule(self.buffer.as_str().to_string());
                true
            }
            Input::Command(cmd) => self.handle_command(cmd).await,
        }
    }

    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Select(range) => {
                let update = self
                    .translator
                    .translate_selection(self.buffer.selection(range))
                    .await;
                ui::print_update(&update);
            }
            SlashCommand::Show => ui::print_buffer(&self.buffer),
            SlashCommand::Clear => {
                self.buffer.clear();
                self.debouncer.cancel();
                ui::print_update(&DisplayUpdate::Clear);
            }
            SlashCommand::File { input, output } => {
                self.start_job(input, output);
            }
            SlashCommand::Cancel => match &self.job {
                Some(job) => {
                    job.handle.cancel();
                    status!("Cancelling after the current chunk...");
                }
                None => ui::print_error("No translation job is running"),
            },
            SlashCommand::Cache => print_summary(&*self.context.resolver.cache().lock()),
            SlashCommand::ClearCache => self.start_clear_cache(),
            SlashCommand::Config => ui::print_config(&self.context),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Usage(usage) => ui::print_error(&format!("Usage: {usage}")),
            SlashCommand::Unknown(cmd) => ui::print_error(&format!("Unknown command: /{cmd}")),
        }
        true
    }

    /// Translates a debounced buffer snapshot. Snapshots that no longer
    /// match the buffer (cleared or edited since) are dropped.
    async fn translate_debounced(&self, snapshot: &str) -> Option<DisplayUpdate> {
        if snapshot != self.buffer.as_str() {
            return None;
        }
        Some(self.translator.translate_buffer(snapshot).await)
    }

    /// Returns `true` if a background job was started.
    fn start_job(&mut self, input: PathBuf, output: Option<PathBuf>) -> bool {
        if !input.is_file() {
            ui::print_error(&format!("Input file not found: {}", input.display()));
            return false;
        }

        let output = output.unwrap_or_else(|| default_output_path(&input));
        let shown = input.display().to_string();

        match BatchJob::spawn(self.context.pipeline(), input, output, &self.slot) {
            Ok(handle) => {
                status!(
                    "Translating {} in the background. Type /cancel to stop.",
                    Style::value(shown)
                );
                self.job = Some(RunningJob {
                    handle,
                    progress: JobProgress::new(),
                });
                true
            }
            Err(e) => {
                ui::print_error(&e.to_string());
                false
            }
        }
    }

    fn handle_job_event(&mut self, event: Option<JobEvent>) {
        let Some(event) = event else {
            self.job = None;
            return;
        };
        let Some(job) = &self.job else {
            return;
        };

        match event {
            JobEvent::Started { .. } => job.progress.set(0.0),
            JobEvent::Progress { processed, total } => {
                job.progress.set(progress_fraction(processed, total));
            }
            JobEvent::LineFailed { line, error } => job.progress.suspend(|| {
                warn!("line {line}: translation failed, kept original text ({error})");
            }),
            JobEvent::Cancelled => {
                job.progress.reset();
                job.progress.finish();
                status!("{}", Style::warning("Translation cancelled. No output was written."));
            }
            JobEvent::Completed(report) => {
                job.progress.finish();
                println!("{}", Style::success("Translation Complete"));
                println!("Saved to: {}", report.output.display());
            }
            JobEvent::Failed(message) => {
                job.progress.finish();
                ui::print_error(&message);
            }
        }
    }

    fn start_clear_cache(&mut self) {
        if self.job.is_some() {
            ui::print_error("Cannot clear the cache while a translation job is running");
            return;
        }

        if !self.context.resolver.cache().lock().has_persisted() {
            report_clear(ClearOutcome::NotFound);
            return;
        }

        println!("{CLEAR_PROMPT}");
        println!("{} [y/N]", Style::warning(CLEAR_WARNING));
        self.confirming_clear = true;
    }

    fn finish_clear_cache(&self, confirmed: bool) {
        let result = clear_with_confirmation(&mut *self.context.resolver.cache().lock(), || {
            Ok(confirmed)
        });

        match result {
            Ok(outcome) => report_clear(outcome),
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    /// Stops the pending translation and waits for a running job to
    /// reach a chunk boundary.
    async fn shutdown(&mut self) {
        self.debouncer.cancel();

        if let Some(job) = self.job.take() {
            job.handle.cancel();
            job.handle.join().await;
        }
    }
}

async fn next_job_event(job: &mut Option<RunningJob>) -> Option<JobEvent> {
    match job {
        Some(job) => job.handle.recv().await,
        None => std::future::pending().await,
    }
}

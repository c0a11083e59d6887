use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::output;

fn hidden_when_quiet(progress_bar: &ProgressBar) {
    if output::is_quiet() {
        progress_bar.set_draw_target(ProgressDrawTarget::hidden());
    }
}

/// A terminal spinner for indicating progress.
///
/// Automatically clears itself when dropped.
pub struct Spinner {
    progress_bar: ProgressBar,
}

impl Spinner {
    /// Creates and starts a new spinner with the given message.
    #[allow(clippy::unwrap_used)]
    pub fn new(message: &str) -> Self {
        let progress_bar = ProgressBar::new_spinner();
        hidden_when_quiet(&progress_bar);
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner} {msg}")
                .unwrap(),
        );
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    /// Stops the spinner and clears it from the terminal.
    pub fn stop(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}

/// Percentage bar for batch jobs, labelled `Progress: N%`.
pub struct JobProgress {
    progress_bar: ProgressBar,
}

impl JobProgress {
    const SCALE: u64 = 100;

    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let progress_bar = ProgressBar::new(Self::SCALE);
        hidden_when_quiet(&progress_bar);
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}]")
                .unwrap()
                .progress_chars("=> "),
        );
        progress_bar.set_message("Progress: 0%");

        Self { progress_bar }
    }

    /// Moves the bar to `fraction` (0.0 ..= 1.0).
    pub fn set(&self, fraction: f64) {
        let percent = (fraction.clamp(0.0, 1.0) * Self::SCALE as f64).round() as u64;
        self.progress_bar.set_position(percent);
        self.progress_bar.set_message(format!("Progress: {percent}%"));
    }

    /// Back to zero, used when a job is cancelled.
    pub fn reset(&self) {
        self.set(0.0);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }

    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.progress_bar.suspend(f)
    }
}

impl Default for JobProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JobProgress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}

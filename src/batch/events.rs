use std::path::PathBuf;

/// Per-line counts for one batch job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Lines copied through untouched.
    pub passthrough: usize,
    pub cache_hits: usize,
    pub translated: usize,
    /// Lines kept untranslated because the provider failed twice.
    pub fallbacks: usize,
}

/// Summary of a completed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub output: PathBuf,
    pub total_lines: usize,
    pub stats: LineStats,
}

/// Message sent from a running job to whoever drives the display.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Started { total: usize },
    Progress { processed: usize, total: usize },
    /// A line fell back to its original text. `line` is 1-based.
    LineFailed { line: usize, error: String },
    /// Stopped on request; nothing was written.
    Cancelled,
    Completed(JobReport),
    Failed(String),
}

/// Fraction of lines processed. An empty job counts as done.
pub fn progress_fraction(processed: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        (processed.min(total) as f64) / (total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        assert!((progress_fraction(5, 12) - 5.0 / 12.0).abs() < f64::EPSILON);
        assert!((progress_fraction(12, 12) - 1.0).abs() < f64::EPSILON);
        assert!((progress_fraction(0, 0) - 1.0).abs() < f64::EPSILON);
    }
}

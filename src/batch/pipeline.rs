use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use super::encoding::{encode_utf16le_with_bom, read_input};
use super::events::{JobEvent, JobReport, LineStats};
use super::job::CancelFlag;
use super::record::{format_translated, parse_candidate, split_lines};
use crate::fs::atomic_write;
use crate::translation::{Resolution, Resolver};

pub const DEFAULT_CHUNK_SIZE: usize = 5;

/// Pause between chunks. Keeps the request rate to the provider down.
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub chunk_size: usize,
    pub chunk_delay: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed(JobReport),
    Cancelled,
}

struct TranslatedLines {
    lines: Vec<String>,
    stats: LineStats,
}

/// Chunked file translation.
///
/// Translations resolved in a chunk are committed to the cache, and the
/// cache saved, only once the whole chunk finishes without cancellation.
#[derive(Clone)]
pub struct BatchPipeline {
    resolver: Resolver,
    options: PipelineOptions,
}

impl BatchPipeline {
    pub fn new(resolver: Resolver, options: PipelineOptions) -> Self {
        Self {
            resolver,
            options: PipelineOptions {
                chunk_size: options.chunk_size.max(1),
                ..options
            },
        }
    }

    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Translates `input` into `output`.
    ///
    /// On cancellation nothing is written and [`JobOutcome::Cancelled`] is
    /// returned. Progress is reported on `events`; the terminal event is
    /// left to the caller.
    pub async fn run(
        &self,
        input: &Path,
        output: &Path,
        cancel: &CancelFlag,
        events: &UnboundedSender<JobEvent>,
    ) -> Result<JobOutcome> {
        let text = read_input(input)?;
        let lines = split_lines(&text);
        let total_lines = lines.len();

        tracing::info!(
            input = %input.display(),
            lines = total_lines,
            provider = self.resolver.provider_name(),
            "starting batch job"
        );

        let Some(translated) = self.translate_lines(&lines, cancel, events).await? else {
            tracing::info!(input = %input.display(), "batch job cancelled");
            return Ok(JobOutcome::Cancelled);
        };

        atomic_write(output, &encode_utf16le_with_bom(&translated.lines.concat()))
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;

        self.resolver.cache().lock().save()?;

        tracing::info!(output = %output.display(), stats = ?translated.stats, "batch job finished");

        Ok(JobOutcome::Completed(JobReport {
            output: output.to_path_buf(),
            total_lines,
            stats: translated.stats,
        }))
    }

    /// Returns `None` if `cancel` was raised before the last chunk committed.
    async fn translate_lines(
        &self,
        lines: &[String],
        cancel: &CancelFlag,
        events: &UnboundedSender<JobEvent>,
    ) -> Result<Option<TranslatedLines>> {
        let total = lines.len();
        let chunk_size = self.options.chunk_size;
        let mut output = Vec::with_capacity(total);
        let mut stats = LineStats::default();

        let _ = events.send(JobEvent::Started { total });

        for (chunk_index, chunk) in lines.chunks(chunk_size).enumerate() {
            if cancel.is_cancelled() {
                return Ok(None);
            }

            let start = chunk_index * chunk_size;
            let mut staged: HashMap<String, String> = HashMap::new();
            let mut chunk_lines = Vec::with_capacity(chunk.len());

            for (offset, line) in chunk.iter().enumerate() {
                let Some(candidate) = parse_candidate(line) else {
                    stats.passthrough += 1;
                    chunk_lines.push(line.clone());
                    continue;
                };

                let resolution = self.resolve_staged(candidate.text, &staged).await;

                match &resolution {
                    Resolution::CacheHit(_) => stats.cache_hits += 1,
                    Resolution::Translated(translated) => {
                        stats.translated += 1;
                        staged.insert(candidate.text.to_string(), translated.clone());
                    }
                    Resolution::Fallback { error } => {
                        let line_no = start + offset + 1;
                        stats.fallbacks += 1;
                        tracing::warn!(line = line_no, error = %error, "keeping original line");
                        let _ = events.send(JobEvent::LineFailed {
                            line: line_no,
                            error: error.to_string(),
                        });
                    }
                }

                chunk_lines.push(
                    resolution
                        .text()
                        .map_or_else(|| line.clone(), |t| format_translated(candidate.id, t)),
                );
            }

            if cancel.is_cancelled() {
                return Ok(None);
            }

            self.commit(staged)?;
            output.extend(chunk_lines);

            let processed = start + chunk.len();
            let _ = events.send(JobEvent::Progress { processed, total });

            if processed < total && !self.options.chunk_delay.is_zero() {
                tokio::time::sleep(self.options.chunk_delay).await;
            }
        }

        Ok(Some(TranslatedLines {
            lines: output,
            stats,
        }))
    }

    async fn resolve_staged(&self, text: &str, staged: &HashMap<String, String>) -> Resolution {
        if let Some(hit) = staged
            .get(text)
            .cloned()
            .or_else(|| self.resolver.cached(text))
        {
            return Resolution::CacheHit(hit);
        }

        match self.resolver.fetch(text).await {
            Ok(translated) => Resolution::Translated(translated),
            Err(error) => Resolution::Fallback { error },
        }
    }

    fn commit(&self, staged: HashMap<String, String>) -> Result<()> {
        if staged.is_empty() {
            return Ok(());
        }

        let mut cache = self.resolver.cache().lock();
        for (source, translated) in staged {
            cache.put(source, translated);
        }
        cache.save()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::batch::decode_input;
    use crate::cache::{JsonCache, MemoryCache, shared};
    use crate::translation::MockTranslator;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn fast_options() -> PipelineOptions {
        PipelineOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: Duration::ZERO,
        }
    }

    fn pipeline(mock: &Arc<MockTranslator>) -> BatchPipeline {
        let resolver = Resolver::new(mock.clone(), shared(MemoryCache::default()));
        BatchPipeline::new(resolver, fast_options())
    }

    async fn run_lines(
        pipeline: &BatchPipeline,
        text: &str,
    ) -> (Option<TranslatedLines>, Vec<JobEvent>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let lines = split_lines(text);
        let result = pipeline
            .translate_lines(&lines, &CancelFlag::new(), &tx)
            .await
            .unwrap();
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (result, events)
    }

    #[tokio::test]
    async fn test_translates_korean_lines() {
        let mock = Arc::new(MockTranslator::new().with_response("안녕하세요", "Hello"));
        let pipeline = pipeline(&mock);

        let (result, _) = run_lines(&pipeline, "42\t안녕하세요\n").await;
        let result = result.unwrap();

        assert_eq!(result.lines, vec!["42\tHello\n"]);
        assert_eq!(result.stats.translated, 1);
        assert_eq!(
            pipeline.resolver.cached("안녕하세요"),
            Some("Hello".to_string())
        );
    }

    #[tokio::test]
    async fn test_passthrough_lines_untouched() {
        let mock = Arc::new(MockTranslator::new());
        let pipeline = pipeline(&mock);

        let (result, _) = run_lines(&pipeline, "7\tHello world\n\nno tabs here\n8\t정지\tx").await;
        let result = result.unwrap();

        assert_eq!(
            result.lines,
            vec!["7\tHello world\n", "\n", "no tabs here\n", "8\tEN(정지)\n"]
        );
        assert_eq!(result.stats.passthrough, 3);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_order_preserved_within_chunk() {
        let mock = Arc::new(MockTranslator::new());
        let pipeline = pipeline(&mock);

        let (result, _) = run_lines(&pipeline, "1\t가\n2\tB\n3\t나\n").await;

        assert_eq!(
            result.unwrap().lines,
            vec!["1\tEN(가)\n", "2\tB\n", "3\tEN(나)\n"]
        );
    }

    #[tokio::test]
    async fn test_fallback_keeps_original_line() {
        let mock = Arc::new(MockTranslator::failing());
        let pipeline = pipeline(&mock);

        let (result, events) = run_lines(&pipeline, "1\t가\tBOOL\n").await;
        let result = result.unwrap();

        assert_eq!(result.lines, vec!["1\t가\tBOOL\n"]);
        assert_eq!(result.stats.fallbacks, 1);
        assert_eq!(mock.calls(), 2);
        assert!(events.iter().any(|e| matches!(
            e,
            JobEvent::LineFailed { line: 1, .. }
        )));
        assert!(pipeline.resolver.cache().lock().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_text_requested_once() {
        let mock = Arc::new(MockTranslator::new());
        let pipeline = pipeline(&mock);

        let (result, _) = run_lines(&pipeline, "1\t가\n2\t가\n3\tx\n4\tx\n5\tx\n6\t가\n").await;
        let result = result.unwrap();

        assert_eq!(mock.calls(), 1);
        assert_eq!(result.stats.translated, 1);
        assert_eq!(result.stats.cache_hits, 2);
    }

    #[tokio::test]
    async fn test_progress_reported_per_chunk() {
        let mock = Arc::new(MockTranslator::new());
        let pipeline = pipeline(&mock);
        let text: String = (1..=12).map(|i| format!("{i}\tx\n")).collect();

        let (_, events) = run_lines(&pipeline, &text).await;

        assert_eq!(
            events,
            vec![
                JobEvent::Started { total: 12 },
                JobEvent::Progress {
                    processed: 5,
                    total: 12
                },
                JobEvent::Progress {
                    processed: 10,
                    total: 12
                },
                JobEvent::Progress {
                    processed: 12,
                    total: 12
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_chunks_only() {
        let mock = Arc::new(MockTranslator::new());
        let resolver = Resolver::new(mock, shared(MemoryCache::default()));
        let pipeline = BatchPipeline::new(
            resolver,
            PipelineOptions {
                chunk_size: 5,
                chunk_delay: Duration::from_millis(300),
            },
        );
        let text: String = (1..=12).map(|i| format!("{i}\t가{i}\n")).collect();

        let started = tokio::time::Instant::now();
        let (result, _) = run_lines(&pipeline, &text).await;
        let elapsed = started.elapsed();

        assert_eq!(result.unwrap().lines.len(), 12);
        assert!(elapsed >= Duration::from_millis(600), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(900), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let mock = Arc::new(MockTranslator::new());
        let pipeline = pipeline(&mock);
        let (tx, _rx) = mpsc::unbounded_channel();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = pipeline
            .translate_lines(&split_lines("1\t가\n"), &cancel, &tx)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_run_writes_utf16_output_and_saves_cache() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.txt");
        let output = temp_dir.path().join("out.txt");
        let cache_path = temp_dir.path().join("cache.json");
        fs::write(&input, "42\t안녕하세요\n7\tHello world\n").unwrap();

        let mock = Arc::new(MockTranslator::new().with_response("안녕하세요", "Hello"));
        let cache = shared(JsonCache::load(&cache_path).unwrap());
        let pipeline = BatchPipeline::new(Resolver::new(mock, cache), fast_options());
        let (tx, _rx) = mpsc::unbounded_channel();

        let outcome = pipeline
            .run(&input, &output, &CancelFlag::new(), &tx)
            .await
            .unwrap();

        let JobOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(report.total_lines, 2);
        assert_eq!(report.output, output);

        let written = decode_input(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(written, "42\tHello\n7\tHello world\n");

        let saved: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&cache_path).unwrap()).unwrap();
        assert_eq!(saved.get("안녕하세요"), Some(&"Hello".to_string()));
    }

    #[tokio::test]
    async fn test_empty_input_writes_empty_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.txt");
        let output = temp_dir.path().join("out.txt");
        fs::write(&input, "").unwrap();

        let mock = Arc::new(MockTranslator::new());
        let pipeline = pipeline(&mock);
        let (tx, _rx) = mpsc::unbounded_channel();

        let outcome = pipeline
            .run(&input, &output, &CancelFlag::new(), &tx)
            .await
            .unwrap();

        assert!(matches!(outcome, JobOutcome::Completed(ref r) if r.total_lines == 0));
        assert_eq!(fs::read(&output).unwrap(), vec![0xFF, 0xFE]);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let mock = Arc::new(MockTranslator::new());
        let resolver = Resolver::new(mock, shared(MemoryCache::default()));
        let pipeline = BatchPipeline::new(
            resolver,
            PipelineOptions {
                chunk_size: 0,
                chunk_delay: Duration::ZERO,
            },
        );

        assert_eq!(pipeline.options().chunk_size, 1);
    }
}

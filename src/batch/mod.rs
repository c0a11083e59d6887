//! File-to-file batch translation.
//!
//! Input is tab-delimited (`id<TAB>text[...]`), one record per line. Lines
//! whose second field contains Hangul are translated, everything else is
//! copied through.

mod encoding;
mod events;
mod job;
mod pipeline;
mod record;

pub use encoding::{DecodeError, decode_input, encode_utf16le_with_bom, read_input};
pub use events::{JobEvent, JobReport, LineStats, progress_fraction};
pub use job::{BatchJob, CancelFlag, JobError, JobHandle, JobSlot};
pub use pipeline::{
    BatchPipeline, DEFAULT_CHUNK_DELAY, DEFAULT_CHUNK_SIZE, JobOutcome, PipelineOptions,
};
pub use record::{Candidate, format_translated, parse_candidate, split_lines};

use std::path::{Path, PathBuf};

/// Default output path: `<input-stem>.en.txt` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}.en.txt"))
}

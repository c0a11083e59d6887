use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::batch::decode_input;

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads source text for one-shot translation.
///
/// Files and stdin may be UTF-8 or UTF-16, like batch input.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&Path>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > MAX_INPUT_SIZE {
            bail!(too_large(size, "file"));
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        decode_input(&bytes).with_context(|| format!("Failed to decode file: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(too_large(buffer.len(), "input"));
            }
        }

        decode_input(&buffer).context("Failed to decode stdin")
    }
}

fn too_large(size: usize, what: &str) -> String {
    format!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
         Consider splitting the {what} into smaller parts, or use 'kotl file'.",
        size as f64 / 1024.0 / 1024.0
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "모터 정지").unwrap();

        let content = InputReader::read(Some(temp_file.path())).unwrap();
        assert_eq!(content.trim(), "모터 정지");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read(Some(Path::new("/nonexistent/path/to/file.txt")));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_utf16_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("안녕".encode_utf16().flat_map(u16::to_le_bytes));
        temp_file.write_all(&bytes).unwrap();

        let content = InputReader::read(Some(temp_file.path())).unwrap();
        assert_eq!(content, "안녕");
    }

    #[test]
    fn test_read_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();

        let content = InputReader::read(Some(temp_file.path())).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let result = InputReader::read(Some(&file_path));
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("max_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE)).unwrap();

        let result = InputReader::read(Some(&file_path)).unwrap();
        assert_eq!(result.len(), MAX_INPUT_SIZE);
    }
}

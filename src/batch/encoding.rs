//! Input decoding and output encoding.
//!
//! Input is read as UTF-8 with a single UTF-16 fallback. Output is always
//! UTF-16LE with a byte order mark.

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use std::fs;
use std::path::Path;
use thiserror::Error;

const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input is neither valid UTF-8 nor valid UTF-16")]
    Undecodable,
}

/// Decodes file contents as UTF-8, falling back to UTF-16.
///
/// A leading UTF-8 BOM is dropped. The UTF-16 attempt honours a BOM and
/// assumes little-endian without one.
pub fn decode_input(bytes: &[u8]) -> Result<String, DecodeError> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
        return Ok(text.to_string());
    }

    tracing::debug!("input is not UTF-8, trying UTF-16");

    let (encoding, bom_len) = Encoding::for_bom(bytes)
        .filter(|(encoding, _)| *encoding == UTF_16LE || *encoding == UTF_16BE)
        .unwrap_or((UTF_16LE, 0));

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(|text| text.into_owned())
        .ok_or(DecodeError::Undecodable)
}

/// Reads and decodes an input file.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    decode_input(&bytes).with_context(|| format!("Failed to decode file: {}", path.display()))
}

/// Encodes `text` as UTF-16LE preceded by a BOM.
pub fn encode_utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(UTF16LE_BOM.len() + text.len() * 2);
    out.extend_from_slice(&UTF16LE_BOM);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

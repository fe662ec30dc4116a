//! CSV loader with ordered encoding fallback.
//!
//! A file is read into memory once, then each [`EncodingCandidate`] is tried
//! in turn: strict decode, then parse. The first candidate that gets through
//! both steps wins.

use encoding_rs::{Encoding, ISO_8859_15, UTF_8, WINDOWS_1252};
use std::path::Path;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::models::{cell_from_raw, Row, Table};

/// A named text encoding to attempt.
#[derive(Debug, Clone, Copy)]
pub struct EncodingCandidate {
    pub label: &'static str,
    pub encoding: &'static Encoding,
}

/// Fallback order for the built-in survey dataset.
pub const DATASET_ENCODINGS: &[EncodingCandidate] = &[
    EncodingCandidate { label: "utf-8", encoding: UTF_8 },
    EncodingCandidate { label: "latin-1", encoding: WINDOWS_1252 },
];

/// Fallback order for uploaded files.
pub const VIEWER_ENCODINGS: &[EncodingCandidate] = &[
    EncodingCandidate { label: "utf-8", encoding: UTF_8 },
    EncodingCandidate { label: "latin-1", encoding: WINDOWS_1252 },
    EncodingCandidate { label: "iso-8859-15", encoding: ISO_8859_15 },
];

/// How the field separator is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Fixed(u8),
    /// Pick the most frequent of `, ; \t |` on the header line.
    Detect,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Fixed(b',')
    }
}

/// A parsed table plus what it took to read it.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    /// Label of the encoding that succeeded.
    pub encoding: &'static str,
    pub delimiter: u8,
}

/// Load a CSV file, trying `encodings` in order.
pub fn load_table<P: AsRef<Path>>(
    path: P,
    encodings: &[EncodingCandidate],
    delimiter: Delimiter,
) -> LoadResult<LoadedTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_bytes(&bytes, encodings, delimiter)
}

/// Same as [`load_table`] for bytes already in memory.
pub fn parse_bytes(
    bytes: &[u8],
    encodings: &[EncodingCandidate],
    delimiter: Delimiter,
) -> LoadResult<LoadedTable> {
    let mut last_error = None;

    for candidate in encodings {
        let content = match decode_strict(bytes, candidate.encoding) {
            Some(content) => content,
            None => {
                debug!(encoding = candidate.label, "decode failed, trying next encoding");
                continue;
            }
        };

        let sep = match delimiter {
            Delimiter::Fixed(b) => b,
            Delimiter::Detect => detect_delimiter(&content),
        };

        match parse_str(&content, sep) {
            Ok(table) => {
                return Ok(LoadedTable {
                    table,
                    encoding: candidate.label,
                    delimiter: sep,
                })
            }
            Err(e) => {
                debug!(encoding = candidate.label, error = %e, "parse failed, trying next encoding");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| LoadError::Undecodable {
        tried: encodings
            .iter()
            .map(|c| c.label)
            .collect::<Vec<_>>()
            .join(", "),
    }))
}

/// Decode without replacement characters. `None` on any invalid sequence.
pub fn decode_strict(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
    } else {
        bytes
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Ties keep the earlier candidate, so plain single-column files stay `,`.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let mut best = b',';
    let mut best_count = 0;

    for sep in [b',', b';', b'\t', b'|'] {
        let count = first_line.bytes().filter(|&b| b == sep).count();
        if count > best_count {
            best_count = count;
            best = sep;
        }
    }

    best
}

/// Parse decoded CSV text. The first record is the header.
pub fn parse_str(content: &str, delimiter: u8) -> LoadResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(cell_from_raw).collect());
    }

    Ok(Table::new(headers, rows))
}

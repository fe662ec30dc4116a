//! Error types for the survey dashboard and CSV viewer.
//!
//! - [`LoadError`] - Reading, decoding, parsing or cleaning a CSV file
//! - [`ValidationError`] - Rejected upload submissions
//! - [`ServerError`] - Everything a request handler can fail with
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while turning a file on disk into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No candidate encoding could decode the bytes.
    #[error("Could not decode file with any of: {tried}")]
    Undecodable { tried: String },

    /// CSV structure is broken (e.g. inconsistent column counts).
    #[error("Invalid CSV format at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// No header row.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A column the pipeline depends on is not in the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
                format!("expected {} fields, found {}", expected_len, len)
            }
            _ => err.to_string(),
        };
        LoadError::Malformed { line, message }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Reasons an upload is refused before anything touches the disk.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The multipart body had no `file` field.
    #[error("No file part in the request")]
    MissingFile,

    /// A `file` field was sent but no file was chosen.
    #[error("No file selected")]
    EmptyFilename,

    /// Extension not in the allowlist.
    #[error("File type not allowed: '{filename}' (allowed: {allowed})")]
    DisallowedExtension { filename: String, allowed: String },

    /// Nothing usable left after sanitizing.
    #[error("Invalid filename: '{0}'")]
    UnsafeFilename(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Loading or cleaning failed.
    #[error("{0}")]
    Load(#[from] LoadError),

    /// Upload was refused.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Writing an upload failed.
    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),

    /// The multipart stream could not be read.
    #[error("Invalid upload request: {0}")]
    Multipart(String),

    /// Request body over the configured limit.
    #[error("File exceeds the maximum upload size of {} MB", .0 / (1024 * 1024))]
    TooLarge(usize),

    /// Requested upload does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// A blocking load task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::Load(LoadError::NotFound(_)) | ServerError::NotFound(_) => 404,
            ServerError::Load(_) => 422,
            ServerError::Validation(_) | ServerError::Multipart(_) => 400,
            ServerError::TooLarge(_) => 413,
            ServerError::Storage(_) | ServerError::Task(_) => 500,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for request handlers.
pub type ServerResult<T> = Result<T, ServerError>;

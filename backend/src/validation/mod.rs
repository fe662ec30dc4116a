//! Upload validation and filename sanitizing.
//!
//! Runs before anything is written: a submission is either turned into a
//! safe storage name or rejected with a [`ValidationError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mindstats::{validate_upload, AppConfig};
//!
//! let config = AppConfig::default();
//! assert_eq!(validate_upload(&config, Some("../../etc/report.csv")).unwrap(), "etc_report.csv");
//! assert!(validate_upload(&config, Some("image.png")).is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::AppConfig;
use crate::error::ValidationError;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex is valid"));

/// Device names Windows refuses as file stems.
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "AUX", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3", "PRN", "NUL",
];

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory.
///
/// Accented letters are folded to ASCII (`ção` → `cao`). Path separators
/// become word breaks, words are joined with `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading/trailing dots and underscores are
/// trimmed. May return an empty string.
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or("").to_ascii_uppercase();
    if !trimmed.is_empty() && WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Check an uploaded filename and return the name to store it under.
///
/// `None` means the form sent a file field without a filename.
pub fn validate_upload(config: &AppConfig, filename: Option<&str>) -> Result<String, ValidationError> {
    let filename = filename.map(str::trim).unwrap_or("");
    if filename.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if !config.allows_extension(filename) {
        return Err(ValidationError::DisallowedExtension {
            filename: filename.to_string(),
            allowed: config.allowed_extensions_display(),
        });
    }

    let safe = sanitize_filename(filename);
    if safe.is_empty() || !config.allows_extension(&safe) {
        return Err(ValidationError::UnsafeFilename(filename.to_string()));
    }

    Ok(safe)
}

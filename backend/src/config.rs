//! Application configuration.
//!
//! Built once at startup (see `main.rs`) and shared with every handler.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default location of the survey dataset.
pub const DEFAULT_DATA_PATH: &str = "data/mental_health_tech_survey.csv";

/// Default upload directory.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Maximum request body size for uploads: 16 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Rows shown on the dashboard.
pub const DEFAULT_INDEX_PREVIEW_ROWS: usize = 50;

/// Rows shown by the generic viewer.
pub const DEFAULT_VIEWER_PREVIEW_ROWS: usize = 1000;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// CSV rendered on `/`.
    pub data_path: PathBuf,
    /// Where uploads are stored.
    pub upload_dir: PathBuf,
    pub max_body_bytes: usize,
    /// Lower-case extensions accepted by `/upload`, without the dot.
    pub allowed_extensions: Vec<String>,
    pub index_preview_rows: usize,
    pub viewer_preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allowed_extensions: vec!["csv".to_string()],
            index_preview_rows: DEFAULT_INDEX_PREVIEW_ROWS,
            viewer_preview_rows: DEFAULT_VIEWER_PREVIEW_ROWS,
        }
    }
}

impl AppConfig {
    /// Bind address, falling back to all interfaces if `host` does not parse.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.port)))
    }

    /// Whether `filename` has an allowed extension (case-insensitive).
    pub fn allows_extension(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Allowed extensions for error messages, e.g. `csv`.
    pub fn allowed_extensions_display(&self) -> String {
        self.allowed_extensions.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(config.index_preview_rows, 50);
        assert_eq!(config.viewer_preview_rows, 1000);
        assert_eq!(config.allowed_extensions, vec!["csv"]);
        assert_eq!(config.socket_addr().port(), 3000);
    }

    #[test]
    fn test_allows_extension() {
        let config = AppConfig::default();
        assert!(config.allows_extension("report.csv"));
        assert!(config.allows_extension("REPORT.CSV"));
        assert!(config.allows_extension("archive.tar.csv"));
        assert!(!config.allows_extension("image.png"));
        assert!(!config.allows_extension("csv"));
        assert!(!config.allows_extension("report.csv.png"));
    }

    #[test]
    fn test_bad_host_falls_back() {
        let config = AppConfig {
            host: "not a host".into(),
            port: 8080,
            ..AppConfig::default()
        };
        assert_eq!(config.socket_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
    }
}

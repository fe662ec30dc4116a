//! # mindstats - Mental Health in Tech survey dashboard
//!
//! Loads the survey CSV, cleans it, computes summary statistics and serves
//! them as an HTML dashboard. A second flow accepts arbitrary CSV uploads and
//! shows them in a generic table viewer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│    Pages    │
//! │ (UTF8/Lat1) │     │ (fallback)  │     │ (clean+agg) │     │   (HTML)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mindstats::{build_dashboard, AppConfig};
//!
//! let config = AppConfig::default();
//! let dashboard = build_dashboard(&config.data_path, config.index_preview_rows).unwrap();
//! println!("{} respondents, {}% sought treatment",
//!     dashboard.stats.total, dashboard.stats.pct_treatment);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Runtime configuration
//! - [`models`] - Table model
//! - [`parser`] - CSV loading with encoding fallback
//! - [`transform`] - Cleaning, projection, statistics and pipelines
//! - [`validation`] - Upload filename checks
//! - [`storage`] - Upload directory
//! - [`api`] - HTTP server and pages

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Uploads
pub mod storage;
pub mod validation;

// HTTP
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{LoadError, LoadResult, ServerError, ServerResult, ValidationError};

// =============================================================================
// Re-exports - Config & Models
// =============================================================================

pub use config::AppConfig;
pub use models::{Cell, Row, Table};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    load_table,
    parse_bytes,
    parse_str,
    detect_delimiter,
    Delimiter,
    EncodingCandidate,
    LoadedTable,
    DATASET_ENCODINGS,
    VIEWER_ENCODINGS,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    build_dashboard,
    clean,
    project,
    summarize,
    view_file,
    CleanedTable,
    CleaningRules,
    Dashboard,
    ProjectedView,
    StatsSummary,
    ViewerReport,
    RELEVANT_COLUMNS,
};

// =============================================================================
// Re-exports - Uploads
// =============================================================================

pub use storage::UploadStore;
pub use validation::{sanitize_filename, validate_upload};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}

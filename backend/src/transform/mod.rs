//! Data preparation.
//!
//! This module turns a loaded table into what the pages display:
//! - Clean: required fields and the age range
//! - Project: the relevant survey columns
//! - Stats: counts, mean and percentages
//! - Pipeline: the per-request sequences for `/` and `/view`

pub mod clean;
pub mod pipeline;
pub mod project;
pub mod stats;

pub use clean::{clean, CleanedTable, CleaningRules};
pub use pipeline::{build_dashboard, view_file, Dashboard, ViewerReport};
pub use project::{project, ProjectedView, RELEVANT_COLUMNS};
pub use stats::{summarize, StatsSummary};

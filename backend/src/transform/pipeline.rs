//! Request pipelines.
//!
//! - [`build_dashboard`]: load → clean → project → summarize, for `/`
//! - [`view_file`]: load → cap, for `/view/{filename}`
//!
//! Both run synchronously and start from the file on disk every time.
//!
//! # Example
//!
//! ```rust,ignore
//! use mindstats::transform::pipeline::build_dashboard;
//!
//! let dashboard = build_dashboard("data/mental_health_tech_survey.csv".as_ref(), 50)?;
//! println!("{} respondents", dashboard.stats.total);
//! ```

use std::path::Path;
use tracing::info;

use super::clean::{clean, CleaningRules};
use super::project::{project, ProjectedView, RELEVANT_COLUMNS};
use super::stats::{summarize, StatsSummary};
use crate::error::LoadResult;
use crate::models::Row;
use crate::parser::{load_table, Delimiter, DATASET_ENCODINGS, VIEWER_ENCODINGS};

/// Everything the dashboard page needs.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: StatsSummary,
    pub preview: ProjectedView,
    /// Encoding the dataset was read with.
    pub encoding: &'static str,
}

/// Shape and preview of an arbitrary CSV file.
#[derive(Debug, Clone)]
pub struct ViewerReport {
    pub filename: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    /// The preview holds fewer rows than the file.
    pub truncated: bool,
    pub preview: Vec<Row>,
    /// Encoding label that decoded the file.
    pub encoding: &'static str,
    pub delimiter: char,
}

/// Build the survey dashboard from the CSV at `path`.
pub fn build_dashboard(path: &Path, preview_rows: usize) -> LoadResult<Dashboard> {
    let loaded = load_table(path, DATASET_ENCODINGS, Delimiter::default())?;
    info!(
        file = %path.display(),
        encoding = loaded.encoding,
        rows = loaded.table.len(),
        "dataset loaded"
    );

    let raw_rows = loaded.table.len();
    let cleaned = clean(loaded.table, &CleaningRules::survey())?;
    info!(kept = cleaned.len(), dropped = raw_rows - cleaned.len(), "dataset cleaned");

    let preview = project(&cleaned, &RELEVANT_COLUMNS, preview_rows);
    let stats = summarize(&cleaned);

    Ok(Dashboard {
        stats,
        preview,
        encoding: loaded.encoding,
    })
}

/// Load any CSV at `path` and report its shape with at most `cap` rows.
pub fn view_file(path: &Path, filename: &str, cap: usize) -> LoadResult<ViewerReport> {
    let loaded = load_table(path, VIEWER_ENCODINGS, Delimiter::Detect)?;
    let table = loaded.table;
    let row_count = table.len();

    info!(
        file = filename,
        encoding = loaded.encoding,
        rows = row_count,
        columns = table.column_count(),
        "file loaded for viewing"
    );

    Ok(ViewerReport {
        filename: filename.to_string(),
        row_count,
        column_count: table.column_count(),
        columns: table.columns().to_vec(),
        truncated: row_count > cap,
        preview: table.head(cap).rows().to_vec(),
        encoding: loaded.encoding,
        delimiter: loaded.delimiter as char,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_dashboard_end_to_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(
            &path,
            "Timestamp,Age,Gender,Country,treatment,family_history\n\
             2014-08-27,37,Female,United States,Yes,No\n\
             2014-08-27,44,M,United States,No,No\n\
             2014-08-27,32,Male,Canada,No,Yes\n\
             2014-08-27,8,Male,Canada,Yes,Yes\n\
             2014-08-27,31,Male,United Kingdom,,No\n",
        )
        .unwrap();

        let dashboard = build_dashboard(&path, 50).unwrap();

        assert_eq!(dashboard.encoding, "utf-8");
        assert_eq!(dashboard.stats.total, 3);
        assert_eq!(dashboard.stats.sought_treatment, 1);
        assert_eq!(dashboard.stats.unique_countries, 2);
        assert_eq!(dashboard.stats.mean_age, 37.7);
        assert_eq!(dashboard.preview.columns, vec!["Age", "Gender", "Country", "family_history", "treatment"]);
        assert_eq!(dashboard.preview.rows.len(), 3);
    }

    #[test]
    fn test_dashboard_missing_file() {
        let dir = tempdir().unwrap();
        let result = build_dashboard(&dir.path().join("absent.csv"), 50);
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_viewer_caps_at_thousand() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.csv");
        let mut csv = String::from("id,value\n");
        for i in 0..1500 {
            csv.push_str(&format!("{},{}\n", i, i * 2));
        }
        fs::write(&path, csv).unwrap();

        let report = view_file(&path, "big.csv", 1000).unwrap();

        assert_eq!(report.row_count, 1500);
        assert_eq!(report.preview.len(), 1000);
        assert!(report.truncated);
        assert_eq!(report.column_count, 2);
        assert_eq!(report.columns, vec!["id", "value"]);
    }

    #[test]
    fn test_viewer_small_file_not_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.csv");
        fs::write(&path, "a;b;c\n1;2;3\n").unwrap();

        let report = view_file(&path, "small.csv", 1000).unwrap();

        assert!(!report.truncated);
        assert_eq!(report.delimiter, ';');
        assert_eq!(report.column_count, 3);
        assert_eq!(report.row_count, 1);
    }
}

//! Domain models for tabular CSV data.
//!
//! - [`Table`] - Header-ordered columns with string cells
//! - [`Cell`] - A single value, `None` when missing
//! - [`is_missing_marker`] - Which raw strings count as missing

// =============================================================================
// Cells
// =============================================================================

/// One value in a table. `None` means the source field was missing.
pub type Cell = Option<String>;

/// A row, aligned with [`Table::columns`].
pub type Row = Vec<Cell>;

/// Raw field values read as missing data.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw CSV field denotes a missing value.
pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

/// Convert a raw CSV field into a [`Cell`].
pub fn cell_from_raw(raw: &str) -> Cell {
    if is_missing_marker(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

// =============================================================================
// Table
// =============================================================================

/// In-memory table with a header-defined schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table. Rows shorter than the header are padded with missing
    /// cells, longer rows are cut.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of a column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Keep the rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// First `n` rows, all columns.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Restrict to the given columns, in the given order.
    ///
    /// Names not present in the table are skipped.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Table {
        let picks: Vec<(String, usize)> = names
            .iter()
            .filter_map(|n| {
                let name = n.as_ref();
                self.column_index(name).map(|i| (name.to_string(), i))
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| picks.iter().map(|(_, i)| row[*i].clone()).collect())
            .collect();

        Table {
            columns: picks.into_iter().map(|(name, _)| name).collect(),
            rows,
        }
    }
}

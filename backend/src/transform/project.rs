//! Column projection for the dashboard preview.

use crate::models::{Row, Table};

/// Survey columns worth showing, in display order.
pub const RELEVANT_COLUMNS: [&str; 19] = [
    "Age",
    "Gender",
    "Country",
    "self_employed",
    "family_history",
    "treatment",
    "work_interfere",
    "no_employees",
    "remote_work",
    "tech_company",
    "benefits",
    "wellness_program",
    "seek_help",
    "anonymity",
    "leave",
    "mental_health_consequence",
    "coworkers",
    "supervisor",
    "mental_health_interview",
];

/// Leading rows of a table restricted to allowlisted columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedView {
    /// Allowlisted columns present in the source, allowlist order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ProjectedView {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Intersect `allowlist` with the table's columns and keep the first `cap` rows.
pub fn project(table: &Table, allowlist: &[&str], cap: usize) -> ProjectedView {
    let present: Vec<&str> = allowlist
        .iter()
        .copied()
        .filter(|name| table.has_column(name))
        .collect();

    if present.is_empty() {
        return ProjectedView::default();
    }

    let view = table.head(cap).select(&present);
    ProjectedView {
        columns: view.columns().to_vec(),
        rows: view.rows().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_allowlist_order_wins() {
        let table = parse_str("treatment,Extra,Country,Age\nYes,x,US,30\n", b',').unwrap();
        let view = project(&table, &RELEVANT_COLUMNS, 50);

        assert_eq!(view.columns, vec!["Age", "Country", "treatment"]);
        assert_eq!(
            view.rows[0],
            vec![Some("30".into()), Some("US".into()), Some("Yes".into())]
        );
    }

    #[test]
    fn test_output_is_subset_of_both() {
        let table = parse_str("Age,Gender,Other,leave\n30,M,1,No\n", b',').unwrap();
        let view = project(&table, &RELEVANT_COLUMNS, 50);

        for col in &view.columns {
            assert!(RELEVANT_COLUMNS.contains(&col.as_str()));
            assert!(table.has_column(col));
        }
        assert_eq!(view.columns.len(), 3);
    }

    #[test]
    fn test_empty_intersection() {
        let table = parse_str("foo,bar\n1,2\n", b',').unwrap();
        let view = project(&table, &RELEVANT_COLUMNS, 50);

        assert!(view.is_empty());
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_row_cap() {
        let mut csv = String::from("Age\n");
        for i in 0..120 {
            csv.push_str(&format!("{}\n", 18 + i % 50));
        }
        let table = parse_str(&csv, b',').unwrap();

        assert_eq!(project(&table, &RELEVANT_COLUMNS, 50).rows.len(), 50);
        assert_eq!(project(&table, &RELEVANT_COLUMNS, 500).rows.len(), 120);
    }
}

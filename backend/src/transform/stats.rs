//! Summary statistics over a cleaned survey table.
//!
//! Every metric is always present: a column missing from the header counts
//! as zero, and percentages are zero when there are no rows.

use std::collections::HashSet;

use serde::Serialize;

use super::clean::{parse_number, CleanedTable};
use crate::models::Table;

/// Values counted as "interference" in `work_interfere`.
pub const INTERFERENCE_VALUES: &[&str] = &["Often", "Sometimes"];

/// Dashboard metrics. Serialized keys match the dashboard's metric names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total: usize,
    #[serde(rename = "buscou_tratamento")]
    pub sought_treatment: usize,
    #[serde(rename = "historico_familiar")]
    pub family_history: usize,
    #[serde(rename = "trabalho_interferido")]
    pub work_interfered: usize,
    #[serde(rename = "empresa_tech")]
    pub tech_company: usize,
    #[serde(rename = "beneficios_sim")]
    pub has_benefits: usize,
    #[serde(rename = "trabalho_remoto")]
    pub remote_work: usize,
    #[serde(rename = "idade_media")]
    pub mean_age: f64,
    #[serde(rename = "paises_unicos")]
    pub unique_countries: usize,
    #[serde(rename = "perc_tratamento")]
    pub pct_treatment: f64,
    #[serde(rename = "perc_historico")]
    pub pct_family_history: f64,
    #[serde(rename = "perc_interferencia")]
    pub pct_work_interfered: f64,
    #[serde(rename = "perc_beneficios")]
    pub pct_benefits: f64,
}

/// Compute all metrics for a cleaned table.
pub fn summarize(table: &CleanedTable) -> StatsSummary {
    let total = table.len();

    let sought_treatment = count_yes(table, "treatment");
    let family_history = count_yes(table, "family_history");
    let work_interfered = count_in(table, "work_interfere", INTERFERENCE_VALUES);
    let has_benefits = count_yes(table, "benefits");

    StatsSummary {
        total,
        sought_treatment,
        family_history,
        work_interfered,
        tech_company: count_yes(table, "tech_company"),
        has_benefits,
        remote_work: count_yes(table, "remote_work"),
        mean_age: mean(table, table.numeric_column()).map(round1).unwrap_or(0.0),
        unique_countries: count_distinct(table, "Country"),
        pct_treatment: percentage(sought_treatment, total),
        pct_family_history: percentage(family_history, total),
        pct_work_interfered: percentage(work_interfered, total),
        pct_benefits: percentage(has_benefits, total),
    }
}

/// Rows whose `column` is exactly `"Yes"`.
pub fn count_yes(table: &Table, column: &str) -> usize {
    count_in(table, column, &["Yes"])
}

/// Rows whose `column` is one of `values`. Zero when the column is absent.
pub fn count_in(table: &Table, column: &str, values: &[&str]) -> usize {
    if !table.has_column(column) {
        return 0;
    }
    table
        .column(column)
        .map(|cells| {
            cells
                .filter(|c| c.as_deref().is_some_and(|v| values.contains(&v)))
                .count()
        })
        .unwrap_or(0)
}

/// Distinct non-missing values of `column`. Zero when absent.
pub fn count_distinct(table: &Table, column: &str) -> usize {
    if !table.has_column(column) {
        return 0;
    }
    table
        .column(column)
        .map(|cells| cells.flatten().collect::<HashSet<&String>>().len())
        .unwrap_or(0)
}

/// Mean of the numeric values in `column`, `None` if there are none.
pub fn mean(table: &Table, column: &str) -> Option<f64> {
    if !table.has_column(column) {
        return None;
    }
    let values: Vec<f64> = table.column(column)?.filter_map(parse_number).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `count / total * 100` to one decimal; zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(count as f64 / total as f64 * 100.0)
}

/// Round to one decimal place. Exact ties go to the even digit.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::transform::clean::{clean, CleaningRules};

    fn cleaned(csv: &str) -> CleanedTable {
        clean(parse_str(csv, b',').unwrap(), &CleaningRules::survey()).unwrap()
    }

    #[test]
    fn test_forty_of_hundred_sought_treatment() {
        let mut csv = String::from("Age,treatment\n");
        for i in 0..100 {
            let answer = if i < 40 { "Yes" } else { "No" };
            csv.push_str(&format!("{},{}\n", 20 + i % 40, answer));
        }

        let stats = summarize(&cleaned(&csv));
        assert_eq!(stats.total, 100);
        assert_eq!(stats.sought_treatment, 40);
        assert_eq!(stats.pct_treatment, 40.0);
    }

    #[test]
    fn test_zero_rows_gives_zero_percentages() {
        let stats = summarize(&cleaned("Age,treatment,family_history,work_interfere,benefits\n90,Yes,Yes,Often,Yes\n"));

        assert_eq!(stats.total, 0);
        assert_eq!(stats.pct_treatment, 0.0);
        assert_eq!(stats.pct_family_history, 0.0);
        assert_eq!(stats.pct_work_interfered, 0.0);
        assert_eq!(stats.pct_benefits, 0.0);
        assert_eq!(stats.mean_age, 0.0);
    }

    #[test]
    fn test_absent_columns_count_zero() {
        let stats = summarize(&cleaned("Age,treatment,benefits\n30,Yes,Yes\n40,No,No\n"));

        assert_eq!(stats.family_history, 0);
        assert_eq!(stats.tech_company, 0);
        assert_eq!(stats.remote_work, 0);
        assert_eq!(stats.work_interfered, 0);
        assert_eq!(stats.unique_countries, 0);
        // present columns are unaffected by absent ones
        assert_eq!(stats.has_benefits, 1);
        assert_eq!(stats.pct_benefits, 50.0);
    }

    #[test]
    fn test_full_survey_metrics() {
        let csv = "\
Age,Country,treatment,family_history,work_interfere,tech_company,benefits,remote_work
25,United States,Yes,No,Often,Yes,Yes,No
32,Canada,No,Yes,Sometimes,Yes,Don't know,Yes
44,United States,Yes,Yes,Never,No,No,No
19,,No,No,NA,Yes,Yes,Yes
";
        let stats = summarize(&cleaned(csv));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.sought_treatment, 2);
        assert_eq!(stats.family_history, 2);
        assert_eq!(stats.work_interfered, 2);
        assert_eq!(stats.tech_company, 3);
        assert_eq!(stats.has_benefits, 2);
        assert_eq!(stats.remote_work, 2);
        assert_eq!(stats.unique_countries, 2);
        assert_eq!(stats.mean_age, 30.0);
        assert_eq!(stats.pct_treatment, 50.0);
        assert_eq!(stats.pct_work_interfered, 50.0);
    }

    #[test]
    fn test_yes_is_case_sensitive() {
        let stats = summarize(&cleaned("Age,treatment\n30,yes\n31,YES\n32,Yes\n"));
        assert_eq!(stats.sought_treatment, 1);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(round1(31.25), 31.2);
        assert_eq!(round1(31.75), 31.8);
        assert_eq!(round1(-0.25), -0.2);
    }

    #[test]
    fn test_ties_round_to_even() {
        let mut csv = String::from("Age,treatment\n");
        for i in 0..16 {
            let answer = if i == 0 { "Yes" } else { "No" };
            let age = if i % 4 == 3 { 31 } else { 30 };
            csv.push_str(&format!("{},{}\n", age, answer));
        }

        let stats = summarize(&cleaned(&csv));
        assert_eq!(stats.total, 16);
        assert_eq!(stats.pct_treatment, 6.2);
        assert_eq!(stats.mean_age, 30.2);
    }

    #[test]
    fn test_serialized_metric_names() {
        let stats = summarize(&cleaned("Age,treatment\n30,Yes\n"));
        let json = serde_json::to_value(&stats).unwrap();

        for key in [
            "total",
            "buscou_tratamento",
            "historico_familiar",
            "trabalho_interferido",
            "empresa_tech",
            "beneficios_sim",
            "trabalho_remoto",
            "idade_media",
            "paises_unicos",
            "perc_tratamento",
            "perc_historico",
            "perc_interferencia",
            "perc_beneficios",
        ] {
            assert!(json.get(key).is_some(), "missing metric {key}");
        }
        assert_eq!(json["perc_tratamento"], 100.0);
    }
}

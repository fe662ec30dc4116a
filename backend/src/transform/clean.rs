//! Row cleaning: drop incomplete rows, then bound the numeric column.

use std::ops::Deref;

use crate::error::{LoadError, LoadResult};
use crate::models::{Cell, Table};

/// What a row must satisfy to survive cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningRules {
    /// Columns that must hold a value.
    pub required: Vec<String>,
    /// Column compared against `[min, max]`.
    pub numeric: String,
    pub min: f64,
    pub max: f64,
}

impl CleaningRules {
    /// Rules for the mental health survey: age and treatment required,
    /// ages between 18 and 75 inclusive.
    pub fn survey() -> Self {
        Self {
            required: vec!["Age".to_string(), "treatment".to_string()],
            numeric: "Age".to_string(),
            min: 18.0,
            max: 75.0,
        }
    }
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self::survey()
    }
}

/// A table whose rows all passed [`clean`].
///
/// Only [`clean`] builds one, so holding a `CleanedTable` means every row has
/// its required fields and an in-range numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    table: Table,
    numeric: String,
}

impl CleanedTable {
    /// Name of the range-checked column.
    pub fn numeric_column(&self) -> &str {
        &self.numeric
    }
}

impl Deref for CleanedTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}

/// Parse a numeric cell. Surrounding whitespace is ignored; anything that is
/// not a finite number yields `None`.
pub fn parse_number(cell: &Cell) -> Option<f64> {
    cell.as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

/// Apply `rules` to `table`.
///
/// Fails only when a column named by the rules is absent from the header.
/// A numeric cell holding text is treated like a missing value and the row
/// is dropped.
pub fn clean(mut table: Table, rules: &CleaningRules) -> LoadResult<CleanedTable> {
    let required = rules
        .required
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| LoadError::MissingColumn(name.clone()))
        })
        .collect::<LoadResult<Vec<usize>>>()?;

    let numeric = table
        .column_index(&rules.numeric)
        .ok_or_else(|| LoadError::MissingColumn(rules.numeric.clone()))?;

    table.retain_rows(|row| required.iter().all(|&i| row[i].is_some()));

    table.retain_rows(|row| match parse_number(&row[numeric]) {
        Some(v) => v >= rules.min && v <= rules.max,
        None => false,
    });

    Ok(CleanedTable {
        table,
        numeric: rules.numeric.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn survey(csv: &str) -> Table {
        parse_str(csv, b',').unwrap()
    }

    #[test]
    fn test_survey_rules() {
        let rules = CleaningRules::survey();
        assert_eq!(rules.required, vec!["Age", "treatment"]);
        assert_eq!(rules.numeric, "Age");
        assert_eq!((rules.min, rules.max), (18.0, 75.0));
    }

    #[test]
    fn test_drops_missing_required() {
        let table = survey("Age,treatment,Country\n30,Yes,US\n,Yes,US\n40,,UK\n50,No,\n");
        let cleaned = clean(table, &CleaningRules::survey()).unwrap();

        // a missing Country is fine, Country is not required
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let table = survey("Age,treatment\n17,Yes\n18,Yes\n75,No\n76,No\n-29,Yes\n99999999999,No\n");
        let cleaned = clean(table, &CleaningRules::survey()).unwrap();

        let ages: Vec<_> = cleaned.column("Age").unwrap().cloned().collect();
        assert_eq!(ages, vec![Some("18".into()), Some("75".into())]);
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let table = survey("Age,treatment\nthirty,Yes\n 31 ,Yes\n31.5,No\n");
        let cleaned = clean(table, &CleaningRules::survey()).unwrap();

        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_cleaned_rows_hold_invariant() {
        let table = survey("Age,treatment\n22,Yes\nNA,Yes\n80,No\n45,NULL\n60,No\ninf,Yes\n");
        let rules = CleaningRules::survey();
        let cleaned = clean(table, &rules).unwrap();

        let age = cleaned.column_index("Age").unwrap();
        let treatment = cleaned.column_index("treatment").unwrap();
        for row in cleaned.rows() {
            let v = parse_number(&row[age]).unwrap();
            assert!((rules.min..=rules.max).contains(&v));
            assert!(row[treatment].is_some());
        }
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_missing_column_fails() {
        let table = survey("Age,Country\n30,US\n");
        let result = clean(table, &CleaningRules::survey());

        assert!(matches!(result, Err(LoadError::MissingColumn(c)) if c == "treatment"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&Some("42".into())), Some(42.0));
        assert_eq!(parse_number(&Some(" 3.5 ".into())), Some(3.5));
        assert_eq!(parse_number(&Some("abc".into())), None);
        assert_eq!(parse_number(&None), None);
    }
}

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            // Empty cell, like a NaN in a data grid.
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`. Only numeric cells qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// The inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// Every non-missing cell is an integer or a float.
    Numeric,
    /// Every non-missing cell is a true/false literal.
    Boolean,
    Text,
}

/// One named column; `cells[i]` belongs to row `i`.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }

    /// Numeric view of the column, `None` for missing cells.
    /// Returns `None` altogether if the column is not numeric.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        if !self.is_numeric() {
            return None;
        }
        Some(self.cells.iter().map(CellValue::as_f64).collect())
    }

    /// Whether every non-missing value is a whole number.
    pub fn is_integral(&self) -> bool {
        self.cells.iter().all(|c| match c {
            CellValue::Integer(_) | CellValue::Null => true,
            CellValue::Float(v) => v.fract() == 0.0,
            _ => false,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete uploaded table
// ---------------------------------------------------------------------------

/// An uploaded table: ordered columns aligned by row index.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Name of the file the data came from.
    pub source: String,
    pub columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from columns that all have the same length.
    pub fn new(source: impl Into<String>, columns: Vec<Column>) -> Self {
        let row_count = columns.first().map_or(0, |c| c.cells.len());
        debug_assert!(columns.iter().all(|c| c.cells.len() == row_count));
        Dataset {
            source: source.into(),
            columns,
            row_count,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column that can be plotted.
    pub fn numeric_column(&self, name: &str) -> Option<&Column> {
        self.column(name).filter(|c| c.is_numeric())
    }

    /// Names of the numeric columns, in column order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    /// The first `n` rows of every column, rendered as text.
    pub fn head(&self, n: usize) -> Preview {
        let rows = (0..self.row_count.min(n))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.cells[row].to_string())
                    .collect()
            })
            .collect();
        Preview {
            columns: self.column_names(),
            rows,
            total_rows: self.row_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Preview – what the landing page grid shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Row count of the full dataset, not just the preview.
    pub total_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            "movies.csv",
            vec![
                Column {
                    name: "title".into(),
                    kind: ColumnKind::Text,
                    cells: vec![
                        CellValue::Text("Alien".into()),
                        CellValue::Text("Heat".into()),
                    ],
                },
                Column {
                    name: "rating".into(),
                    kind: ColumnKind::Numeric,
                    cells: vec![CellValue::Float(8.5), CellValue::Null],
                },
                Column {
                    name: "year".into(),
                    kind: ColumnKind::Numeric,
                    cells: vec![CellValue::Integer(1979), CellValue::Integer(1995)],
                },
            ],
        )
    }

    #[test]
    fn numeric_names_follow_column_order() {
        assert_eq!(sample().numeric_column_names(), vec!["rating", "year"]);
    }

    #[test]
    fn numeric_column_rejects_text() {
        let ds = sample();
        assert!(ds.numeric_column("title").is_none());
        assert!(ds.numeric_column("missing").is_none());
        assert_eq!(
            ds.numeric_column("rating").and_then(Column::numeric_values),
            Some(vec![Some(8.5), None])
        );
    }

    #[test]
    fn head_caps_rows_and_keeps_all_columns() {
        let ds = sample();
        let preview = ds.head(10);
        assert_eq!(preview.columns, vec!["title", "rating", "year"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[1], vec!["Heat", "", "1995"]);

        assert_eq!(ds.head(1).rows.len(), 1);
        assert_eq!(ds.head(1).total_rows, 2);
    }

    #[test]
    fn integral_detection() {
        let ds = sample();
        assert!(ds.column("year").is_some_and(Column::is_integral));
        assert!(!ds.column("rating").is_some_and(Column::is_integral));
    }
}

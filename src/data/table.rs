//! Raw Table Module
//! In-memory record set with named columns, as produced by the loader.

use std::fmt;

/// A single cell of a raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Missing cells are nulls, NaN floats and blank text.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Float(v) => v.is_nan(),
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Bool(_) | Cell::Int(_) => false,
        }
    }

    /// Coerce the cell to a finite number.
    ///
    /// Returns `None` for anything that is not numeric-coercible.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Null => return None,
            Cell::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Cell::Int(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Render the cell as a group label. Text is kept verbatim.
    pub fn to_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "null"),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

/// Ordered sequence of records with named columns.
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from column-major data. Shorter columns are padded with nulls.
    pub fn from_columns(columns: Vec<(String, Vec<Cell>)>) -> Self {
        let height = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
        let names = columns.iter().map(|(n, _)| n.clone()).collect();
        let mut table = Self::new(names);

        for i in 0..height {
            let row = columns
                .iter()
                .map(|(_, cells)| cells.get(i).cloned().unwrap_or(Cell::Null))
                .collect();
            table.rows.push(row);
        }

        table
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

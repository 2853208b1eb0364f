//! CSV Data Loader Module
//! Reads CSV files with Polars and converts them into a `RawTable`.

use crate::data::table::{Cell, RawTable};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Group labels of the built-in example dataset.
pub const EXAMPLE_GROUPS: [&str; 2] = ["남자", "여자"];
/// Values of the first example group.
pub const EXAMPLE_VALUES_A: [i64; 7] = [78, 67, 97, 87, 78, 76, 79];
/// Values of the second example group.
pub const EXAMPLE_VALUES_B: [i64; 6] = [56, 76, 56, 45, 65, 55];

/// Loads raw tables from CSV files or the built-in example.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: &Path) -> Result<RawTable, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        // Every column is read as text; numeric coercion happens in the processor.
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        debug!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded csv"
        );

        Self::from_dataframe(&df)
    }

    /// Convert a Polars DataFrame into a `RawTable`, preserving column order.
    pub fn from_dataframe(df: &DataFrame) -> Result<RawTable, LoaderError> {
        let columns = df.get_columns();
        let mut table = RawTable::new(columns.iter().map(|c| c.name().to_string()).collect());

        for i in 0..df.height() {
            let row = columns
                .iter()
                .map(|col| col.get(i).map(any_value_to_cell))
                .collect::<PolarsResult<Vec<Cell>>>()?;
            table.push_row(row);
        }

        Ok(table)
    }

    /// The canonical example dataset used when nothing is uploaded.
    pub fn example() -> RawTable {
        let mut groups = Vec::new();
        let mut values = Vec::new();

        for &v in &EXAMPLE_VALUES_A {
            groups.push(Cell::from(EXAMPLE_GROUPS[0]));
            values.push(Cell::Int(v));
        }
        for &v in &EXAMPLE_VALUES_B {
            groups.push(Cell::from(EXAMPLE_GROUPS[1]));
            values.push(Cell::Int(v));
        }

        RawTable::from_columns(vec![
            ("group".to_string(), groups),
            ("value".to_string(), values),
        ])
    }
}

fn any_value_to_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Null,
        AnyValue::Boolean(b) => Cell::Bool(b),
        AnyValue::String(s) => Cell::Text(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
        AnyValue::Int8(v) => Cell::Int(v as i64),
        AnyValue::Int16(v) => Cell::Int(v as i64),
        AnyValue::Int32(v) => Cell::Int(v as i64),
        AnyValue::Int64(v) => Cell::Int(v),
        AnyValue::UInt8(v) => Cell::Int(v as i64),
        AnyValue::UInt16(v) => Cell::Int(v as i64),
        AnyValue::UInt32(v) => Cell::Int(v as i64),
        AnyValue::UInt64(v) => i64::try_from(v)
            .map(Cell::Int)
            .unwrap_or(Cell::Float(v as f64)),
        AnyValue::Float32(v) => Cell::Float(v as f64),
        AnyValue::Float64(v) => Cell::Float(v),
        other => Cell::Text(other.to_string().trim_matches('"').to_string()),
    }
}

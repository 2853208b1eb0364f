//! Data Processor Module
//! Validates a raw table and splits it into exactly two numeric samples.

use crate::data::table::{Cell, RawTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Canonical name of the grouping column.
pub const GROUP_COLUMN: &str = "group";
/// Canonical name of the value column.
pub const VALUE_COLUMN: &str = "value";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepareError {
    #[error("At least 2 columns are required, found {found}")]
    InsufficientColumns { found: usize },
    #[error("Column '{0}' does not exist")]
    MissingColumn(String),
    #[error("The value column must be numeric (row {row}: '{raw}')")]
    NonNumericValue { row: usize, raw: String },
    #[error("Exactly two groups are required, found: {found:?}")]
    GroupCount { found: Vec<String> },
}

/// Explicit choice of the group and value columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub group: String,
    pub value: String,
}

impl ColumnMapping {
    pub fn new(group: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
        }
    }
}

/// Observed values for a single group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub label: String,
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The two samples extracted from a table, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedData {
    pub sample_a: Sample,
    pub sample_b: Sample,
    /// Rows removed because the group or value was missing.
    pub dropped_rows: usize,
}

/// Handles data cleaning and partitioning.
pub struct DataProcessor;

impl DataProcessor {
    /// Resolve the (group, value) column indices.
    ///
    /// An explicit mapping wins; otherwise `group`/`value` are used by name when
    /// both exist, falling back to the first two columns.
    pub fn resolve_columns(
        table: &RawTable,
        mapping: Option<&ColumnMapping>,
    ) -> Result<(usize, usize), PrepareError> {
        if let Some(mapping) = mapping {
            let group = table
                .column_index(&mapping.group)
                .ok_or_else(|| PrepareError::MissingColumn(mapping.group.clone()))?;
            let value = table
                .column_index(&mapping.value)
                .ok_or_else(|| PrepareError::MissingColumn(mapping.value.clone()))?;
            return Ok((group, value));
        }

        if let (Some(group), Some(value)) = (
            table.column_index(GROUP_COLUMN),
            table.column_index(VALUE_COLUMN),
        ) {
            return Ok((group, value));
        }

        if table.width() < 2 {
            return Err(PrepareError::InsufficientColumns {
                found: table.width(),
            });
        }

        debug!(
            group = %table.columns()[0],
            value = %table.columns()[1],
            "mapping columns positionally"
        );
        Ok((0, 1))
    }

    /// Validate and partition a table into two samples.
    pub fn prepare(
        table: &RawTable,
        mapping: Option<&ColumnMapping>,
    ) -> Result<PreparedData, PrepareError> {
        let (group_idx, value_idx) = Self::resolve_columns(table, mapping)?;

        let cleaned: Vec<(usize, &Cell, &Cell)> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| (i, &row[group_idx], &row[value_idx]))
            .filter(|(_, g, v)| !g.is_missing() && !v.is_missing())
            .collect();
        let dropped_rows = table.height() - cleaned.len();

        // Coercion is all-or-nothing: one bad cell rejects the column.
        let records = cleaned
            .iter()
            .map(|&(row, group, value)| {
                value
                    .to_number()
                    .map(|v| (group.to_label(), v))
                    .ok_or_else(|| PrepareError::NonNumericValue {
                        row,
                        raw: value.to_string(),
                    })
            })
            .collect::<Result<Vec<(String, f64)>, _>>()?;

        let mut labels: Vec<String> = Vec::new();
        for (label, _) in &records {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }

        if labels.len() != 2 {
            return Err(PrepareError::GroupCount { found: labels });
        }

        let mut values_a = Vec::new();
        let mut values_b = Vec::new();
        for (label, value) in records {
            if label == labels[0] {
                values_a.push(value);
            } else {
                values_b.push(value);
            }
        }

        debug!(
            label_a = %labels[0],
            n_a = values_a.len(),
            label_b = %labels[1],
            n_b = values_b.len(),
            dropped_rows,
            "prepared samples"
        );

        let mut labels = labels.into_iter();
        Ok(PreparedData {
            sample_a: Sample::new(labels.next().unwrap_or_default(), values_a),
            sample_b: Sample::new(labels.next().unwrap_or_default(), values_b),
            dropped_rows,
        })
    }
}

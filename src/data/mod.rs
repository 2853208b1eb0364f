//! Data module - CSV loading, raw tables and sample preparation

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError, EXAMPLE_GROUPS, EXAMPLE_VALUES_A, EXAMPLE_VALUES_B};
pub use processor::{
    ColumnMapping, DataProcessor, PrepareError, PreparedData, Sample, GROUP_COLUMN, VALUE_COLUMN,
};
pub use table::{Cell, RawTable};

//! Stats module - descriptive statistics, t-test and narrative

mod descriptive;
pub mod narrative;
mod ttest;

pub use descriptive::DescriptiveStats;
pub use narrative::{significance_stars, Locale};
pub use ttest::{ConfigError, TTestEngine, TTestResult, TailMode, TestConfig, DEFAULT_ALPHA};

//! # ttest_report
//!
//! Independent-samples t-test over a two-column (group, value) dataset, with a
//! publication-style report.
//!
//! The pipeline is split in two pure steps:
//!
//! - **[`data`]**: load a CSV into a [`data::RawTable`], then
//!   [`data::DataProcessor::prepare`] validates it and splits it into exactly two samples.
//! - **[`stats`]**: [`stats::TTestEngine::analyze`] runs the pooled-variance t-test and
//!   produces a [`stats::TTestResult`] including the narrative sentence.
//!
//! [`report`] formats results as text or JSON and [`charts`] renders the
//! mean ± CI bar chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod stats;

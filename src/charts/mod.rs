//! Charts module - Mean ± CI bar chart data and rendering

mod error_bars;
mod renderer;

pub use error_bars::{Bar, ErrorBarChart};
pub use renderer::{ChartError, ChartRenderer};

//! Static Chart Renderer
//! Draws the mean ± CI bar chart to a PNG file with plotters.

use crate::charts::ErrorBarChart;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Bar fill, matplotlib's default blue.
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const ERROR_BAR_WIDTH: u32 = 14;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_error<E: Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

/// Renders `ErrorBarChart` data to image files.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the chart as a PNG of the given pixel size.
    pub fn render_png(
        chart: &ErrorBarChart,
        caption: &str,
        y_label: &str,
        output_path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let (y_min, y_max) = chart.y_range();
        let mut ctx = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(55)
            .build_cartesian_2d((0u32..2u32).into_segmented(), y_min..y_max)
            .map_err(render_error)?;

        let labels = &chart.labels;
        ctx.configure_mesh()
            .disable_x_mesh()
            .y_desc(y_label)
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => labels
                    .get(*i as usize)
                    .cloned()
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(render_error)?;

        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(BAR_COLOR.filled())
                .margin(30)
                .data(
                    chart
                        .bars()
                        .filter(|bar| bar.mean.is_finite())
                        .map(|bar| (bar.index as u32, bar.mean)),
                ),
        )
        .map_err(render_error)?;

        ctx.draw_series(
            chart
                .bars()
                .filter(|bar| bar.mean.is_finite() && bar.margin.is_finite())
                .map(|bar| {
                    ErrorBar::new_vertical(
                        SegmentValue::CenterOf(bar.index as u32),
                        bar.low(),
                        bar.mean,
                        bar.high(),
                        BLACK.stroke_width(2),
                        ERROR_BAR_WIDTH,
                    )
                }),
        )
        .map_err(render_error)?;

        root.present().map_err(render_error)?;
        debug!(path = %output_path.display(), "chart written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn writes_png_file() {
        let chart = ErrorBarChart::new(
            ["a".to_string(), "b".to_string()],
            [80.29, 58.83],
            [7.83, 9.47],
        );
        let path = std::env::temp_dir().join(format!("ttest_chart_{}.png", std::process::id()));

        ChartRenderer::render_png(&chart, "Mean ± 95% CI", "Mean", &path, (400, 300)).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
        let _ = std::fs::remove_file(&path);
    }
}

//! ttest-report - Independent-samples t-test report from a CSV file
//!
//! Without a CSV argument the built-in example dataset is analysed.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use ttest_report::charts::ChartRenderer;
use ttest_report::config::AnalysisSettings;
use ttest_report::data::{ColumnMapping, DataLoader, DataProcessor};
use ttest_report::report::ReportFormatter;
use ttest_report::stats::{Locale, TTestEngine, TailMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ttest-report")]
#[command(version, about = "Independent-samples t-test with a formatted report")]
struct Cli {
    /// CSV file with a group column and a numeric value column
    csv: Option<PathBuf>,

    /// Name of the group column (requires --value-col)
    #[arg(long, requires = "value_col")]
    group_col: Option<String>,

    /// Name of the value column (requires --group-col)
    #[arg(long, requires = "group_col")]
    value_col: Option<String>,

    /// Tail mode: two, greater (A > B) or less (A < B)
    #[arg(long)]
    tail: Option<TailMode>,

    /// Significance level in (0, 0.5]
    #[arg(long)]
    alpha: Option<f64>,

    /// Report language: en or ko
    #[arg(long)]
    locale: Option<Locale>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the mean ± CI chart to this PNG file
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Do not render the chart
    #[arg(long, conflicts_with = "chart")]
    no_chart: bool,

    /// JSON settings file (flags override its values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<AnalysisSettings> {
        let mut settings = match &self.config {
            Some(path) => AnalysisSettings::load(path)?,
            None => AnalysisSettings::default(),
        };

        if let Some(tail) = self.tail {
            settings.tail_mode = tail;
        }
        if let Some(alpha) = self.alpha {
            settings.alpha = alpha;
        }
        if let Some(locale) = self.locale {
            settings.locale = locale;
        }
        if let Some(chart) = &self.chart {
            settings.chart_path = chart.clone();
            settings.show_chart = true;
        }
        if self.no_chart {
            settings.show_chart = false;
        }

        Ok(settings)
    }

    fn mapping(&self) -> Option<ColumnMapping> {
        match (&self.group_col, &self.value_col) {
            (Some(group), Some(value)) => Some(ColumnMapping::new(group, value)),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "ttest_report=debug"
    } else {
        "ttest_report=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings()?;
    let config = settings.test_config()?;

    let table = match &cli.csv {
        Some(path) => DataLoader::load_csv(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            info!("no CSV given, using the example dataset");
            DataLoader::example()
        }
    };

    let prepared = DataProcessor::prepare(&table, cli.mapping().as_ref())?;
    info!(
        group_a = %prepared.sample_a.label,
        n_a = prepared.sample_a.len(),
        group_b = %prepared.sample_b.label,
        n_b = prepared.sample_b.len(),
        dropped = prepared.dropped_rows,
        "data prepared"
    );

    let result = TTestEngine::analyze_prepared(&prepared, &config);

    match cli.format {
        OutputFormat::Text => print!("{}", ReportFormatter::text(&result, settings.locale)),
        OutputFormat::Json => println!("{}", ReportFormatter::json(&result)?),
    }

    if settings.show_chart {
        let (caption, y_label) = ReportFormatter::chart_titles(&result, settings.locale);
        ChartRenderer::render_png(
            &result.error_bars(),
            &caption,
            y_label,
            &settings.chart_path,
            (settings.chart_width, settings.chart_height),
        )?;
        info!(path = %settings.chart_path.display(), "chart saved");
    }

    Ok(())
}

//! Two-Sample T-Test Module
//! Pooled-variance (Student's) t-test with tail adjustment and confidence interval.

use crate::charts::ErrorBarChart;
use crate::data::{PreparedData, Sample};
use crate::stats::descriptive::DescriptiveStats;
use crate::stats::narrative::{self, Locale};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Significance level must be in (0, 0.5], got {0}")]
    AlphaOutOfRange(f64),
    #[error("Unknown tail mode '{0}' (expected two, greater or less)")]
    UnknownTailMode(String),
}

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TailMode {
    #[default]
    TwoTailed,
    /// H1: mean(A) > mean(B)
    OneTailedAGreaterB,
    /// H1: mean(A) < mean(B)
    OneTailedALessB,
}

impl TailMode {
    /// Adjust a two-sided p-value to this tail mode.
    pub fn adjust_p_value(self, p_two: f64, t_statistic: f64) -> f64 {
        let half = p_two / 2.0;
        match self {
            TailMode::TwoTailed => p_two,
            TailMode::OneTailedAGreaterB => {
                if t_statistic > 0.0 {
                    half
                } else {
                    1.0 - half
                }
            }
            TailMode::OneTailedALessB => {
                if t_statistic < 0.0 {
                    half
                } else {
                    1.0 - half
                }
            }
        }
    }

    /// Upper quantile used for the critical value.
    pub fn critical_quantile(self, alpha: f64) -> f64 {
        match self {
            TailMode::TwoTailed => 1.0 - alpha / 2.0,
            TailMode::OneTailedAGreaterB | TailMode::OneTailedALessB => 1.0 - alpha,
        }
    }
}

impl fmt::Display for TailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TailMode::TwoTailed => "two-tailed",
            TailMode::OneTailedAGreaterB => "one-tailed (A > B)",
            TailMode::OneTailedALessB => "one-tailed (A < B)",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TailMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "two" | "two-tailed" | "two-sided" => Ok(TailMode::TwoTailed),
            "greater" | "a>b" | "one-tailed-a-greater-b" => Ok(TailMode::OneTailedAGreaterB),
            "less" | "a<b" | "one-tailed-a-less-b" => Ok(TailMode::OneTailedALessB),
            other => Err(ConfigError::UnknownTailMode(other.to_string())),
        }
    }
}

/// Test configuration consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestConfig {
    tail_mode: TailMode,
    alpha: f64,
    locale: Locale,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            tail_mode: TailMode::TwoTailed,
            alpha: DEFAULT_ALPHA,
            locale: Locale::En,
        }
    }
}

impl TestConfig {
    pub fn new(tail_mode: TailMode, alpha: f64) -> Result<Self, ConfigError> {
        if !(alpha > 0.0 && alpha <= 0.5) {
            return Err(ConfigError::AlphaOutOfRange(alpha));
        }
        Ok(Self {
            tail_mode,
            alpha,
            locale: Locale::En,
        })
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn tail_mode(&self) -> TailMode {
        self.tail_mode
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// Full outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestResult {
    pub label_a: String,
    pub label_b: String,
    pub descriptive_a: DescriptiveStats,
    pub descriptive_b: DescriptiveStats,
    pub tail_mode: TailMode,
    pub alpha: f64,
    pub t_statistic: f64,
    /// `n1 + n2 - 2`; may be zero or negative for degenerate input.
    pub degrees_of_freedom: i64,
    /// Two-sided p-value before tail adjustment.
    pub p_two_tailed: f64,
    /// Tail-adjusted p-value.
    pub p_value: f64,
    pub mean_difference: f64,
    pub pooled_variance: f64,
    pub standard_error_diff: f64,
    pub t_critical: f64,
    pub confidence_interval: (f64, f64),
    pub confidence_level: f64,
    pub significant: bool,
    pub stars: &'static str,
    pub narrative: String,
}

impl TTestResult {
    /// False when any reported quantity is NaN, i.e. the samples were too small.
    pub fn is_reportable(&self) -> bool {
        !(self.t_statistic.is_nan()
            || self.p_value.is_nan()
            || self.confidence_interval.0.is_nan()
            || self.confidence_interval.1.is_nan())
    }

    /// Inputs for the per-group mean ± CI bar chart.
    pub fn error_bars(&self) -> ErrorBarChart {
        ErrorBarChart::new(
            [self.label_a.clone(), self.label_b.clone()],
            [self.descriptive_a.mean, self.descriptive_b.mean],
            [
                self.t_critical * self.descriptive_a.standard_error(),
                self.t_critical * self.descriptive_b.standard_error(),
            ],
        )
    }
}

/// Stateless two-sample t-test engine.
pub struct TTestEngine;

impl TTestEngine {
    /// Run the test on the output of the data processor.
    pub fn analyze_prepared(data: &PreparedData, config: &TestConfig) -> TTestResult {
        Self::analyze(&data.sample_a, &data.sample_b, config)
    }

    /// Run the equal-variance t-test of `sample_a` against `sample_b`.
    ///
    /// Never fails: degenerate sample sizes propagate as NaN fields.
    pub fn analyze(sample_a: &Sample, sample_b: &Sample, config: &TestConfig) -> TTestResult {
        let desc_a = DescriptiveStats::from_values(&sample_a.values);
        let desc_b = DescriptiveStats::from_values(&sample_b.values);

        let n1 = desc_a.n as f64;
        let n2 = desc_b.n as f64;
        let df = desc_a.n as i64 + desc_b.n as i64 - 2;

        if desc_a.n < 2 || desc_b.n < 2 {
            warn!(n_a = desc_a.n, n_b = desc_b.n, "sample too small for variance estimate");
        }

        let mean_difference = desc_a.mean - desc_b.mean;

        let (pooled_variance, standard_error_diff) = if df > 0 {
            let sp2 = ((n1 - 1.0) * desc_a.variance + (n2 - 1.0) * desc_b.variance) / df as f64;
            (sp2, (sp2 * (1.0 / n1 + 1.0 / n2)).sqrt())
        } else {
            (f64::NAN, f64::NAN)
        };

        let t_statistic = mean_difference / standard_error_diff;
        let distribution = Self::distribution(df);

        let p_two_tailed = distribution
            .as_ref()
            // statrs rejects a NaN argument, so 0/0 statistics never reach the CDF
            .filter(|_| !t_statistic.is_nan())
            .map(|dist| 2.0 * (1.0 - dist.cdf(t_statistic.abs())))
            .unwrap_or(f64::NAN);

        let tail_mode = config.tail_mode();
        let alpha = config.alpha();
        let p_value = tail_mode.adjust_p_value(p_two_tailed, t_statistic);

        let t_critical = distribution
            .as_ref()
            .map(|dist| dist.inverse_cdf(tail_mode.critical_quantile(alpha)))
            .unwrap_or(f64::NAN);

        let margin = t_critical * standard_error_diff;
        let confidence_interval = (mean_difference - margin, mean_difference + margin);

        debug!(
            t = t_statistic,
            df,
            p = p_value,
            se = standard_error_diff,
            t_crit = t_critical,
            "t-test computed"
        );

        let mut result = TTestResult {
            label_a: sample_a.label.clone(),
            label_b: sample_b.label.clone(),
            descriptive_a: desc_a,
            descriptive_b: desc_b,
            tail_mode,
            alpha,
            t_statistic,
            degrees_of_freedom: df,
            p_two_tailed,
            p_value,
            mean_difference,
            pooled_variance,
            standard_error_diff,
            t_critical,
            confidence_interval,
            confidence_level: 1.0 - alpha,
            significant: p_value < alpha,
            stars: narrative::significance_stars(p_value),
            narrative: String::new(),
        };
        result.narrative = narrative::compose(&result, config.locale());
        result
    }

    fn distribution(df: i64) -> Option<StudentsT> {
        if df <= 0 {
            return None;
        }
        StudentsT::new(0.0, 1.0, df as f64).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample(label: &str, values: &[f64]) -> Sample {
        Sample::new(label, values.to_vec())
    }

    #[test]
    fn alpha_domain_is_enforced() {
        assert!(TestConfig::new(TailMode::TwoTailed, 0.05).is_ok());
        assert!(TestConfig::new(TailMode::TwoTailed, 0.5).is_ok());
        assert_eq!(
            TestConfig::new(TailMode::TwoTailed, 0.0),
            Err(ConfigError::AlphaOutOfRange(0.0))
        );
        assert!(TestConfig::new(TailMode::TwoTailed, 0.51).is_err());
        assert!(TestConfig::new(TailMode::TwoTailed, f64::NAN).is_err());
    }

    #[test]
    fn tail_mode_parsing() {
        assert_eq!("two".parse::<TailMode>(), Ok(TailMode::TwoTailed));
        assert_eq!("A>B".parse::<TailMode>(), Ok(TailMode::OneTailedAGreaterB));
        assert_eq!("less".parse::<TailMode>(), Ok(TailMode::OneTailedALessB));
        assert!("sideways".parse::<TailMode>().is_err());
    }

    #[test]
    fn p_value_adjustment_branches() {
        let p_two = 0.2;
        assert_abs_diff_eq!(TailMode::TwoTailed.adjust_p_value(p_two, 1.0), 0.2);
        assert_abs_diff_eq!(TailMode::OneTailedAGreaterB.adjust_p_value(p_two, 1.0), 0.1);
        assert_abs_diff_eq!(TailMode::OneTailedAGreaterB.adjust_p_value(p_two, -1.0), 0.9);
        assert_abs_diff_eq!(TailMode::OneTailedALessB.adjust_p_value(p_two, -1.0), 0.1);
        assert_abs_diff_eq!(TailMode::OneTailedALessB.adjust_p_value(p_two, 1.0), 0.9);
        // t == 0 falls to the complementary arm in both directions
        assert_abs_diff_eq!(TailMode::OneTailedAGreaterB.adjust_p_value(1.0, 0.0), 0.5);
        assert_abs_diff_eq!(TailMode::OneTailedALessB.adjust_p_value(1.0, 0.0), 0.5);
    }

    #[test]
    fn one_tailed_interval_uses_one_tailed_critical_value() {
        let a = sample("a", &[5.1, 4.9, 5.6, 5.8, 6.0]);
        let b = sample("b", &[4.2, 4.8, 4.4, 5.0, 4.1]);

        let two = TTestEngine::analyze(&a, &b, &TestConfig::default());
        let one = TTestEngine::analyze(
            &a,
            &b,
            &TestConfig::new(TailMode::OneTailedAGreaterB, 0.05).unwrap(),
        );

        let dist = StudentsT::new(0.0, 1.0, 8.0).unwrap();
        assert_abs_diff_eq!(two.t_critical, dist.inverse_cdf(0.975), epsilon = 1e-8);
        assert_abs_diff_eq!(one.t_critical, dist.inverse_cdf(0.95), epsilon = 1e-8);
        assert!(one.confidence_interval.1 - one.confidence_interval.0
            < two.confidence_interval.1 - two.confidence_interval.0);
        assert_abs_diff_eq!(one.p_value, two.p_value / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn singleton_sample_propagates_nan() {
        let a = sample("a", &[1.0]);
        let b = sample("b", &[2.0, 3.0, 4.0]);
        let result = TTestEngine::analyze(&a, &b, &TestConfig::default());

        assert_eq!(result.degrees_of_freedom, 2);
        assert!(result.descriptive_a.variance.is_nan());
        assert!(result.pooled_variance.is_nan());
        assert!(result.standard_error_diff.is_nan());
        assert!(result.t_statistic.is_nan());
        assert!(result.p_two_tailed.is_nan());
        // df = 2 is still a valid distribution
        assert!(result.t_critical.is_finite());
        assert!(result.confidence_interval.0.is_nan());
        assert!(result.p_value.is_nan());
        assert!(!result.significant);
        assert!(!result.is_reportable());
    }

    #[test]
    fn constant_equal_samples_give_nan_statistic() {
        let a = sample("a", &[1.0, 1.0]);
        let b = sample("b", &[1.0, 1.0]);
        let result = TTestEngine::analyze(&a, &b, &TestConfig::default());

        assert_eq!(result.standard_error_diff, 0.0);
        assert!(result.t_statistic.is_nan());
        assert!(result.p_two_tailed.is_nan());
        assert!(result.p_value.is_nan());
        assert!(!result.significant);
        assert_eq!(result.stars, "");
        assert!(!result.is_reportable());
    }

    #[test]
    fn constant_different_samples_give_infinite_statistic() {
        let a = sample("a", &[1.0, 1.0]);
        let b = sample("b", &[2.0, 2.0]);
        let result = TTestEngine::analyze(&a, &b, &TestConfig::default());

        assert_eq!(result.t_statistic, f64::NEG_INFINITY);
        assert_eq!(result.p_value, 0.0);
        assert!(result.significant);
    }

    #[test]
    fn zero_degrees_of_freedom() {
        let a = sample("a", &[1.0]);
        let b = sample("b", &[2.0]);
        let result = TTestEngine::analyze(&a, &b, &TestConfig::default());

        assert_eq!(result.degrees_of_freedom, 0);
        assert!(result.t_critical.is_nan());
        assert!(result.confidence_interval.1.is_nan());
        assert_eq!(result.stars, "");
    }

    #[test]
    fn error_bars_use_per_group_standard_errors() {
        let a = sample("a", &[1.0, 2.0, 3.0]);
        let b = sample("b", &[2.0, 4.0, 6.0, 8.0]);
        let result = TTestEngine::analyze(&a, &b, &TestConfig::default());
        let bars = result.error_bars();

        assert_eq!(bars.labels, ["a".to_string(), "b".to_string()]);
        assert_abs_diff_eq!(bars.means[0], 2.0);
        assert_abs_diff_eq!(bars.means[1], 5.0);
        assert_abs_diff_eq!(bars.margins[0], result.t_critical * (1.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            bars.margins[1],
            result.t_critical * (20.0f64 / 3.0 / 4.0).sqrt(),
            epsilon = 1e-12
        );
    }
}

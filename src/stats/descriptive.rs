//! Descriptive Statistics Module

use serde::Serialize;

/// Count, mean and unbiased spread of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator), NaN when n < 2.
    pub sd: f64,
    /// Sample variance (n - 1 denominator), NaN when n < 2.
    pub variance: f64,
}

impl Default for DescriptiveStats {
    fn default() -> Self {
        Self {
            n: 0,
            mean: f64::NAN,
            sd: f64::NAN,
            variance: f64::NAN,
        }
    }
}

impl DescriptiveStats {
    /// Compute descriptive statistics for an array of values.
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }

        let mean = values.iter().sum::<f64>() / n as f64;

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            f64::NAN
        };

        Self {
            n,
            mean,
            sd: variance.sqrt(),
            variance,
        }
    }

    /// Standard error of the mean, `sqrt(variance / n)`.
    pub fn standard_error(&self) -> f64 {
        (self.variance / self.n as f64).sqrt()
    }
}

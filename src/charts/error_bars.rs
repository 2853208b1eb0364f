//! Error Bar Chart Data
//! The numbers a mean ± CI bar chart needs: two labels, two means, two margins.

use serde::Serialize;

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar<'a> {
    pub index: usize,
    pub label: &'a str,
    pub mean: f64,
    pub margin: f64,
}

impl Bar<'_> {
    pub fn low(&self) -> f64 {
        self.mean - self.margin
    }

    pub fn high(&self) -> f64 {
        self.mean + self.margin
    }
}

/// Per-group means with `t_crit * SE(mean)` error margins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBarChart {
    pub labels: [String; 2],
    pub means: [f64; 2],
    pub margins: [f64; 2],
}

impl ErrorBarChart {
    pub fn new(labels: [String; 2], means: [f64; 2], margins: [f64; 2]) -> Self {
        Self {
            labels,
            means,
            margins,
        }
    }

    pub fn bars(&self) -> impl Iterator<Item = Bar<'_>> {
        (0..2).map(move |i| Bar {
            index: i,
            label: &self.labels[i],
            mean: self.means[i],
            margin: self.margins[i],
        })
    }

    /// Y-axis range covering zero, every finite bar and every finite error bar.
    pub fn y_range(&self) -> (f64, f64) {
        let mut min: f64 = 0.0;
        let mut max: f64 = 0.0;

        for bar in self.bars() {
            for v in [bar.mean, bar.low(), bar.high()] {
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }

        if min == max {
            return (0.0, 1.0);
        }

        let pad = (max - min) * 0.1;
        let lower = if min < 0.0 { min - pad } else { 0.0 };
        let upper = if max > 0.0 { max + pad } else { 0.0 };
        (lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn chart(means: [f64; 2], margins: [f64; 2]) -> ErrorBarChart {
        ErrorBarChart::new(["a".to_string(), "b".to_string()], means, margins)
    }

    #[test]
    fn range_starts_at_zero_for_positive_means() {
        let (lo, hi) = chart([10.0, 20.0], [2.0, 5.0]).y_range();
        assert_abs_diff_eq!(lo, 0.0);
        assert_abs_diff_eq!(hi, 27.5);
    }

    #[test]
    fn range_ignores_nan_margins() {
        let (lo, hi) = chart([10.0, 20.0], [f64::NAN, f64::NAN]).y_range();
        assert_abs_diff_eq!(lo, 0.0);
        assert_abs_diff_eq!(hi, 22.0);
    }

    #[test]
    fn negative_means_extend_below_zero() {
        let (lo, hi) = chart([-10.0, 5.0], [1.0, 1.0]).y_range();
        assert!(lo < -11.0);
        assert!(hi > 6.0);
    }

    #[test]
    fn empty_chart_has_unit_range() {
        assert_eq!(chart([f64::NAN, f64::NAN], [f64::NAN, f64::NAN]).y_range(), (0.0, 1.0));
    }

    #[test]
    fn bars_follow_label_order() {
        let c = chart([1.0, 2.0], [0.5, 0.25]);
        let bars: Vec<_> = c.bars().collect();
        assert_eq!(bars[0].label, "a");
        assert_eq!(bars[1].index, 1);
        assert_abs_diff_eq!(bars[1].high(), 2.25);
    }
}

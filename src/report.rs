//! Report Formatter
//! Turns a `TTestResult` into the text or JSON report shown to the user.

use crate::charts::ErrorBarChart;
use crate::stats::narrative::confidence_percent;
use crate::stats::{DescriptiveStats, Locale, TTestResult};
use serde::Serialize;

const RULE_WIDTH: usize = 50;

struct Labels {
    descriptives: &'static str,
    columns: [&'static str; 5],
    test_result: &'static str,
    t_statistic: &'static str,
    df: &'static str,
    p_value: &'static str,
    mean_diff: &'static str,
    ci: &'static str,
    decision: &'static str,
    significant: &'static str,
    not_significant: &'static str,
    narrative: &'static str,
    insufficient: &'static str,
    chart_caption: &'static str,
    chart_y: &'static str,
}

const EN: Labels = Labels {
    descriptives: "Descriptive statistics",
    columns: ["Group", "n", "Mean", "SD", "Variance"],
    test_result: "Test result",
    t_statistic: "t statistic",
    df: "df",
    p_value: "p value",
    mean_diff: "Mean difference (A-B)",
    ci: "Confidence interval",
    decision: "Decision",
    significant: "significant (reject H0)",
    not_significant: "not significant (fail to reject H0)",
    narrative: "Report",
    insufficient: "Insufficient data to report: each group needs at least 2 values.",
    chart_caption: "Mean ± CI",
    chart_y: "Value (mean)",
};

const KO: Labels = Labels {
    descriptives: "기술통계",
    columns: ["집단", "사례수(n)", "평균", "표준편차", "분산"],
    test_result: "검정 결과",
    t_statistic: "t 통계량",
    df: "자유도 df",
    p_value: "p 값",
    mean_diff: "평균차 (A-B)",
    ci: "신뢰구간",
    decision: "결론",
    significant: "유의함(H0 기각)",
    not_significant: "유의하지 않음(H0 기각 불가)",
    narrative: "해석(리포트 문장)",
    insufficient: "보고할 수 있는 자료가 부족합니다: 각 집단에 최소 2개의 값이 필요합니다.",
    chart_caption: "평균 ± 신뢰구간",
    chart_y: "값(평균)",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN,
        Locale::Ko => &KO,
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a TTestResult,
    chart: ErrorBarChart,
}

/// Formats analysis results for display.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Plain-text report: descriptives, test result, decision and narrative.
    pub fn text(result: &TTestResult, locale: Locale) -> String {
        let l = labels(locale);
        let rule = "=".repeat(RULE_WIDTH);
        let level = confidence_percent(result.confidence_level);
        let (lo, hi) = result.confidence_interval;
        let decision = if result.significant {
            l.significant
        } else {
            l.not_significant
        };

        let mut lines = vec![
            l.descriptives.to_string(),
            rule.clone(),
            format!(
                "{:<10} {:<10} {:<10} {:<10} {:<10}",
                l.columns[0], l.columns[1], l.columns[2], l.columns[3], l.columns[4]
            ),
            "-".repeat(RULE_WIDTH),
            Self::descriptive_row(&result.label_a, &result.descriptive_a),
            Self::descriptive_row(&result.label_b, &result.descriptive_b),
            String::new(),
            l.test_result.to_string(),
            rule.clone(),
            format!("{}: {:.4}", l.t_statistic, result.t_statistic),
            format!("{}: {}", l.df, result.degrees_of_freedom),
            format!("{}: {:.4} {}", l.p_value, result.p_value, result.stars),
            format!("{}: {:.2}", l.mean_diff, result.mean_difference),
            format!("{} ({}%): [{:.2}, {:.2}]", l.ci, level, lo, hi),
            String::new(),
            format!(
                "{}: {} (α={}, p={:.4})",
                l.decision, decision, result.alpha, result.p_value
            ),
        ];
        if !result.is_reportable() {
            lines.push(l.insufficient.to_string());
        }
        lines.extend([
            String::new(),
            l.narrative.to_string(),
            rule,
            result.narrative.clone(),
        ]);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn descriptive_row(label: &str, stats: &DescriptiveStats) -> String {
        format!(
            "{:<10} {:<10} {:<10.2} {:<10.2} {:<10.2}",
            label, stats.n, stats.mean, stats.sd, stats.variance
        )
    }

    /// Pretty JSON of the full result plus the chart inputs.
    pub fn json(result: &TTestResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonReport {
            result,
            chart: result.error_bars(),
        })
    }

    /// Chart caption and y-axis label.
    pub fn chart_titles(result: &TTestResult, locale: Locale) -> (String, &'static str) {
        let l = labels(locale);
        let caption = format!(
            "{} ({}%)",
            l.chart_caption,
            confidence_percent(result.confidence_level)
        );
        (caption, l.chart_y)
    }
}

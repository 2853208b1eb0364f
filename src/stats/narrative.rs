//! Narrative Module
//! Plain-language report sentence and significance stars.

use crate::stats::ttest::{TTestResult, TailMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of the generated report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ko" | "korean" => Ok(Locale::Ko),
            other => Err(format!("Unknown locale '{}' (expected en or ko)", other)),
        }
    }
}

/// `***` below 0.001, `**` below 0.01, `*` below 0.05.
pub fn significance_stars(p_value: f64) -> &'static str {
    if p_value < 0.001 {
        "***"
    } else if p_value < 0.01 {
        "**"
    } else if p_value < 0.05 {
        "*"
    } else {
        ""
    }
}

/// Short label of the tail mode used at the start of the narrative.
pub fn tail_label(tail_mode: TailMode, locale: Locale) -> &'static str {
    match (locale, tail_mode) {
        (Locale::En, TailMode::TwoTailed) => "Two-tailed test",
        (Locale::En, TailMode::OneTailedAGreaterB) => "One-tailed test (H1: A>B)",
        (Locale::En, TailMode::OneTailedALessB) => "One-tailed test (H1: A<B)",
        (Locale::Ko, TailMode::TwoTailed) => "양측검정",
        (Locale::Ko, TailMode::OneTailedAGreaterB) => "단측검정(H1: A>B)",
        (Locale::Ko, TailMode::OneTailedALessB) => "단측검정(H1: A<B)",
    }
}

/// Confidence level as a percentage, e.g. `95` or `97.5`.
pub fn confidence_percent(confidence_level: f64) -> String {
    let pct = confidence_level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}", pct)
    } else {
        format!("{:.1}", pct)
    }
}

/// Build the report sentence for a computed result.
pub fn compose(result: &TTestResult, locale: Locale) -> String {
    let tail = tail_label(result.tail_mode, locale);
    let (a, b) = (&result.label_a, &result.label_b);
    let (m1, m2) = (result.descriptive_a.mean, result.descriptive_b.mean);
    let (lo, hi) = result.confidence_interval;
    let level = confidence_percent(result.confidence_level);

    match locale {
        Locale::En => {
            let clause = if result.significant {
                "a statistically significant difference was found"
            } else {
                "no significant difference was found"
            };
            format!(
                "{tail}: comparing the mean of {a} ({m1:.2}) with the mean of {b} ({m2:.2}) gave \
                 t={t:.2}, df={df}, p={p:.4}{stars}, so {clause}. \
                 Mean difference ({a}-{b}) = {diff:.2}, {level}% CI [{lo:.2}, {hi:.2}].",
                t = result.t_statistic,
                df = result.degrees_of_freedom,
                p = result.p_value,
                stars = result.stars,
                diff = result.mean_difference,
            )
        }
        Locale::Ko => {
            let clause = if result.significant {
                "통계적으로 유의한 차이가 있었다"
            } else {
                "유의한 차이가 없었다"
            };
            format!(
                "{tail} 기준으로 {a}의 평균({m1:.2})과 {b}의 평균({m2:.2})을 비교한 결과, \
                 t={t:.2}, df={df}, p={p:.4}{stars}로 {clause}. \
                 평균차({a}-{b})={diff:.2}, {level}% CI [{lo:.2}, {hi:.2}] 입니다.",
                t = result.t_statistic,
                df = result.degrees_of_freedom,
                p = result.p_value,
                stars = result.stars,
                diff = result.mean_difference,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sample;
    use crate::stats::ttest::{TTestEngine, TestConfig};

    #[test]
    fn star_thresholds() {
        assert_eq!(significance_stars(0.0005), "***");
        assert_eq!(significance_stars(0.001), "**");
        assert_eq!(significance_stars(0.009), "**");
        assert_eq!(significance_stars(0.01), "*");
        assert_eq!(significance_stars(0.049), "*");
        assert_eq!(significance_stars(0.05), "");
        assert_eq!(significance_stars(f64::NAN), "");
    }

    #[test]
    fn confidence_percent_formatting() {
        assert_eq!(confidence_percent(0.95), "95");
        assert_eq!(confidence_percent(0.975), "97.5");
        assert_eq!(confidence_percent(0.5), "50");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("KO".parse::<Locale>(), Ok(Locale::Ko));
        assert_eq!("english".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn english_sentence_reports_every_quantity() {
        let a = Sample::new("ctrl", vec![1.0, 2.0, 3.0, 4.0]);
        let b = Sample::new("trt", vec![1.5, 2.5, 3.5, 4.5]);
        let result = TTestEngine::analyze(&a, &b, &TestConfig::default());

        let text = &result.narrative;
        assert!(text.starts_with("Two-tailed test: "));
        assert!(text.contains("mean of ctrl (2.50)"));
        assert!(text.contains("mean of trt (3.00)"));
        assert!(text.contains(&format!("t={:.2}", result.t_statistic)));
        assert!(text.contains("df=6"));
        assert!(text.contains(&format!("p={:.4}", result.p_value)));
        assert!(text.contains("no significant difference"));
        assert!(text.contains("Mean difference (ctrl-trt) = -0.50"));
        assert!(text.contains("95% CI ["));
    }

    #[test]
    fn korean_sentence_uses_korean_template() {
        let a = Sample::new("A", vec![10.0, 11.0, 12.0]);
        let b = Sample::new("B", vec![1.0, 2.0, 3.0]);
        let config = TestConfig::new(TailMode::OneTailedAGreaterB, 0.05)
            .unwrap()
            .with_locale(Locale::Ko);
        let result = TTestEngine::analyze(&a, &b, &config);

        assert!(result.narrative.starts_with("단측검정(H1: A>B) 기준으로 A의 평균(11.00)"));
        assert!(result.narrative.contains("통계적으로 유의한 차이가 있었다"));
        assert!(result.narrative.ends_with("입니다."));
    }
}

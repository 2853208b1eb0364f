//! Analysis settings loaded from a JSON file.
//!
//! Every field is optional in the file; missing fields take their defaults.
//! Command line flags are applied on top by the binary.

use crate::stats::{ConfigError, Locale, TailMode, TestConfig, DEFAULT_ALPHA};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// User-facing analysis options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub tail_mode: TailMode,
    pub alpha: f64,
    /// Rendering hint only; the computation ignores it.
    pub show_chart: bool,
    pub locale: Locale,
    pub chart_path: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            tail_mode: TailMode::TwoTailed,
            alpha: DEFAULT_ALPHA,
            show_chart: true,
            locale: Locale::En,
            chart_path: PathBuf::from("ttest_chart.png"),
            chart_width: 600,
            chart_height: 430,
        }
    }
}

impl AnalysisSettings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(content)?;
        settings.test_config()?;
        Ok(settings)
    }

    /// The engine configuration these settings describe.
    pub fn test_config(&self) -> Result<TestConfig, ConfigError> {
        Ok(TestConfig::new(self.tail_mode, self.alpha)?.with_locale(self.locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let settings = AnalysisSettings::from_json("{}").unwrap();
        assert_eq!(settings, AnalysisSettings::default());
        assert_eq!(settings.test_config().unwrap(), TestConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let settings = AnalysisSettings::from_json(
            r#"{"tail_mode": "one-tailed-a-less-b", "alpha": 0.01, "show_chart": false, "locale": "ko"}"#,
        )
        .unwrap();

        assert_eq!(settings.tail_mode, TailMode::OneTailedALessB);
        assert_eq!(settings.alpha, 0.01);
        assert!(!settings.show_chart);
        assert_eq!(settings.test_config().unwrap().locale(), Locale::Ko);
    }

    #[test]
    fn out_of_range_alpha_is_rejected() {
        let err = AnalysisSettings::from_json(r#"{"alpha": 0.7}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigError::AlphaOutOfRange(_))
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            AnalysisSettings::from_json("{alpha:"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisSettings::load(Path::new("/no/such/settings.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}

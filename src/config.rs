use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::recording::ColumnLayout;
use crate::signal::{AnalysisConfig, MyoError};
/// Everything needed to turn a pair of recording files into a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub emg_rate_hz: f64,
    pub motion_rate_hz: f64,
    /// EMG channel analysed when a single channel is requested.
    pub channel: usize,
    pub layout: ColumnLayout,
    pub analysis: AnalysisConfig,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            emg_rate_hz: 2000.0,
            motion_rate_hz: 200.0,
            channel: 0,
            layout: ColumnLayout::lab(),
            analysis: AnalysisConfig::default(),
        }
    }
}
impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self, MyoError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MyoError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
    pub fn validate(&self) -> Result<(), MyoError> {
        for rate in [self.emg_rate_hz, self.motion_rate_hz] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(MyoError::InvalidSampleRate(rate));
            }
        }
        if self.layout.emg_columns.is_empty() {
            return Err(MyoError::InvalidConfig("layout lists no EMG columns".into()));
        }
        self.analysis.validate()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }
    #[test]
    fn nested_sections_merge_with_defaults() {
        let config = SessionConfig::from_json(
            r#"{
                "emg_rate_hz": 1000,
                "layout": { "emg_columns": [1, 2], "motion_columns": [3] },
                "analysis": { "smoothing_width": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.emg_rate_hz, 1000.0);
        assert_eq!(config.motion_rate_hz, 200.0);
        assert_eq!(config.layout.motion_columns, vec![3]);
        assert_eq!(config.analysis.smoothing_width, 5);
        assert_eq!(config.analysis.overlap_ratio, 0.2);
    }
    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            SessionConfig::from_json(r#"{ "motion_rate_hz": 0 }"#),
            Err(MyoError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "analysis": { "overlap_ratio": 1.2 } }"#),
            Err(MyoError::InvalidOverlap { .. })
        ));
        assert!(matches!(
            SessionConfig::from_json("{ not json"),
            Err(MyoError::Json(_))
        ));
    }
}

use serde::{Deserialize, Serialize};
use crate::signal::MyoError;
/// Parameters of one windowed analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fraction of a window shared with the next one.
    pub overlap_ratio: f64,
    /// Mean frequency at which the fatigue index reaches 1.
    pub fatigue_threshold: f64,
    /// Nominal window duration in EMG seconds.
    pub window_seconds: f64,
    /// Windows never exceed `total_samples / window_cap_divisor`.
    pub window_cap_divisor: usize,
    /// Lower bound on the FFT length used for the spectral estimate.
    pub min_nfft: usize,
    /// Overlap between Welch segments inside one window.
    pub welch_overlap: f64,
    /// Moving-average width applied to the finished metric sequences.
    pub smoothing_width: usize,
}
impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            overlap_ratio: 0.2,
            fatigue_threshold: 0.0,
            window_seconds: 2.0,
            window_cap_divisor: 5,
            min_nfft: 2048,
            welch_overlap: 0.2,
            smoothing_width: 10,
        }
    }
}
impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), MyoError> {
        check_fraction("overlap_ratio", self.overlap_ratio)?;
        check_fraction("welch_overlap", self.welch_overlap)?;
        if !self.fatigue_threshold.is_finite() {
            return Err(MyoError::InvalidConfig(format!(
                "fatigue_threshold must be finite, got {}",
                self.fatigue_threshold
            )));
        }
        if !self.window_seconds.is_finite() || self.window_seconds <= 0.0 {
            return Err(MyoError::InvalidConfig(format!(
                "window_seconds must be positive, got {}",
                self.window_seconds
            )));
        }
        if self.window_cap_divisor == 0 {
            return Err(MyoError::InvalidConfig("window_cap_divisor must be at least 1".into()));
        }
        if self.min_nfft == 0 {
            return Err(MyoError::InvalidConfig("min_nfft must be at least 1".into()));
        }
        if self.smoothing_width == 0 {
            return Err(MyoError::InvalidConfig("smoothing_width must be at least 1".into()));
        }
        Ok(())
    }
}
fn check_fraction(field: &'static str, value: f64) -> Result<(), MyoError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(MyoError::InvalidOverlap { field, value })
    }
}

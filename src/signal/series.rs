use crate::signal::MyoError;
/// One signal channel, tagged with the rate it was sampled at.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSeries {
    sample_rate_hz: f64,
    samples: Vec<f64>,
}
impl ChannelSeries {
    pub fn new(sample_rate_hz: f64, samples: Vec<f64>) -> Result<Self, MyoError> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(MyoError::InvalidSampleRate(sample_rate_hz));
        }
        Ok(Self {
            sample_rate_hz,
            samples,
        })
    }
    /// Zero-valued channel of `len` samples, used when a recording lacks the
    /// motion column paired with an EMG channel.
    pub fn zeros(sample_rate_hz: f64, len: usize) -> Result<Self, MyoError> {
        Self::new(sample_rate_hz, vec![0.0; len])
    }
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }
    /// Largest absolute sample value; 1.0 for an empty channel.
    pub fn max_abs(&self) -> f64 {
        if self.samples.is_empty() {
            return 1.0;
        }
        self.samples.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
    }
    /// Samples in `[start, start + len)`, clipped to the end of the channel.
    pub fn segment(&self, start: usize, len: usize) -> &[f64] {
        let begin = start.min(self.samples.len());
        let end = start.saturating_add(len).min(self.samples.len());
        &self.samples[begin..end]
    }
}

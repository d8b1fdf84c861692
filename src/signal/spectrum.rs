use std::f64::consts::PI;
use std::sync::Arc;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
/// One-sided power spectral density of a segment.
#[derive(Clone, Debug, Default)]
pub struct PowerSpectrum {
    pub frequencies_hz: Vec<f64>,
    pub power: Vec<f64>,
}
impl PowerSpectrum {
    /// Power-weighted mean frequency. Zero when the spectrum carries no power.
    pub fn mean_frequency(&self) -> f64 {
        let total: f64 = self.power.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return 0.0;
        }
        let weighted: f64 = self
            .frequencies_hz
            .iter()
            .zip(&self.power)
            .map(|(f, p)| f * p)
            .sum();
        weighted / total
    }
}
/// Symmetric Hamming window of `len` points.
pub fn hamming(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (len - 1) as f64;
            (0..len)
                .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
                .collect()
        }
    }
}
/// Welch PSD estimator: Hamming-windowed, mean-detrended segments, averaged
/// periodograms, density scaling. The FFT plan is built once and reused for
/// every window of a run.
pub struct WelchEstimator {
    nfft: usize,
    segment_len: usize,
    overlap_fraction: f64,
    window: Vec<f64>,
    fft: Arc<dyn Fft<f64>>,
}
impl WelchEstimator {
    /// `segment_len` samples per segment, consecutive segments sharing
    /// `floor(overlap_fraction * segment_len)` samples, zero-padded to `nfft`
    /// (raised to `segment_len` if smaller).
    pub fn new(segment_len: usize, overlap_fraction: f64, nfft: usize) -> Self {
        let nfft = nfft.max(segment_len).max(1);
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(nfft);
        Self {
            nfft,
            segment_len,
            overlap_fraction,
            window: hamming(segment_len),
            fft,
        }
    }
    pub fn nfft(&self) -> usize {
        self.nfft
    }
    /// Frequency of each one-sided bin, `k * fs / nfft` for `k in 0..=nfft/2`.
    pub fn frequencies(&self, sample_rate_hz: f64) -> Vec<f64> {
        let resolution = sample_rate_hz / self.nfft as f64;
        (0..=self.nfft / 2).map(|k| k as f64 * resolution).collect()
    }
    pub fn estimate(&self, segment: &[f64], sample_rate_hz: f64) -> PowerSpectrum {
        if segment.is_empty() {
            return PowerSpectrum::default();
        }
        // A segment shorter than the configured length is analysed whole.
        let nperseg = self.segment_len.min(segment.len()).max(1);
        let shortened;
        let window: &[f64] = if nperseg == self.window.len() {
            &self.window
        } else {
            shortened = hamming(nperseg);
            &shortened
        };
        let noverlap = ((self.overlap_fraction * nperseg as f64).floor() as usize).min(nperseg - 1);
        let hop = nperseg - noverlap;
        let segments = (segment.len() - nperseg) / hop + 1;
        let bins = self.nfft / 2 + 1;
        let mut power = vec![0.0; bins];
        let mut buffer = vec![Complex64::new(0.0, 0.0); self.nfft];
        for seg in 0..segments {
            let chunk = &segment[seg * hop..seg * hop + nperseg];
            let mean = chunk.iter().sum::<f64>() / nperseg as f64;
            for (slot, (x, w)) in buffer.iter_mut().zip(chunk.iter().zip(window)) {
                *slot = Complex64::new((x - mean) * w, 0.0);
            }
            for slot in buffer.iter_mut().skip(nperseg) {
                *slot = Complex64::new(0.0, 0.0);
            }
            self.fft.process(&mut buffer);
            for (acc, bin) in power.iter_mut().zip(&buffer) {
                *acc += bin.norm_sqr();
            }
        }
        let window_energy: f64 = window.iter().map(|w| w * w).sum();
        let scale = 1.0 / (sample_rate_hz * window_energy * segments as f64);
        // Fold negative frequencies: double every bin except DC and, for an
        // even transform, Nyquist.
        let last_doubled = if self.nfft % 2 == 0 { bins - 1 } else { bins };
        for (k, p) in power.iter_mut().enumerate() {
            *p *= scale;
            if k > 0 && k < last_doubled {
                *p *= 2.0;
            }
        }
        PowerSpectrum {
            frequencies_hz: self.frequencies(sample_rate_hz),
            power,
        }
    }
    pub fn mean_frequency(&self, segment: &[f64], sample_rate_hz: f64) -> f64 {
        self.estimate(segment, sample_rate_hz).mean_frequency()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn tone(freq_hz: f64, sample_rate_hz: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate_hz).sin())
            .collect()
    }
    #[test]
    fn hamming_is_symmetric_with_low_edges() {
        let w = hamming(9);
        assert!((w[0] - 0.08).abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12);
        for i in 0..9 {
            assert!((w[i] - w[8 - i]).abs() < 1e-12);
        }
        assert_eq!(hamming(1), vec![1.0]);
        assert!(hamming(0).is_empty());
    }
    #[test]
    fn bins_span_dc_to_nyquist() {
        let welch = WelchEstimator::new(400, 0.2, 2048);
        let freqs = welch.frequencies(2000.0);
        assert_eq!(freqs.len(), 1025);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[1024] - 1000.0).abs() < 1e-9);
    }
    #[test]
    fn nfft_never_shorter_than_a_segment() {
        let welch = WelchEstimator::new(4000, 0.2, 2048);
        assert_eq!(welch.nfft(), 4000);
        assert_eq!(welch.frequencies(2000.0).len(), 2001);
    }
    #[test]
    fn pure_tone_peaks_at_its_frequency() {
        let signal = tone(100.0, 1000.0, 1000);
        let welch = WelchEstimator::new(1000, 0.2, 2048);
        let psd = welch.estimate(&signal, 1000.0);
        let (peak, _) = psd
            .power
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &p)| if p > best.1 { (i, p) } else { best });
        assert!((psd.frequencies_hz[peak] - 100.0).abs() < 1.0);
        assert!((psd.mean_frequency() - 100.0).abs() < 2.0);
    }
    #[test]
    fn lower_tone_has_lower_mean_frequency() {
        let welch = WelchEstimator::new(2000, 0.2, 2048);
        let high = welch.mean_frequency(&tone(80.0, 2000.0, 2000), 2000.0);
        let low = welch.mean_frequency(&tone(60.0, 2000.0, 2000), 2000.0);
        assert!(high > low);
    }
    #[test]
    fn silent_or_constant_segment_has_zero_mean_frequency() {
        let welch = WelchEstimator::new(256, 0.2, 2048);
        assert_eq!(welch.mean_frequency(&[0.0; 256], 500.0), 0.0);
        // detrending removes a pure offset
        assert_eq!(welch.mean_frequency(&[3.5; 256], 500.0), 0.0);
        assert_eq!(welch.mean_frequency(&[], 500.0), 0.0);
    }
    #[test]
    fn density_integrates_to_signal_variance() {
        // Parseval: sum(psd) * df ~ variance for a windowed tone
        let signal = tone(50.0, 1000.0, 4000);
        let welch = WelchEstimator::new(1000, 0.2, 1000);
        let psd = welch.estimate(&signal, 1000.0);
        let df = 1000.0 / welch.nfft() as f64;
        let total: f64 = psd.power.iter().sum::<f64>() * df;
        assert!((total - 0.5).abs() < 0.02, "integrated power {total}");
    }
    #[test]
    fn identical_input_gives_identical_output() {
        let signal = tone(37.0, 500.0, 700);
        let welch = WelchEstimator::new(700, 0.2, 2048);
        let a = welch.estimate(&signal, 500.0);
        let b = welch.estimate(&signal, 500.0);
        assert_eq!(a.power, b.power);
    }
}

/// Centered moving average with a uniform kernel of `width` taps.
///
/// Output has the input's length. Output `i` sums the inputs in
/// `[i - width/2, i + (width - 1)/2]` that exist and divides by the full
/// `width`, so edge values shrink in proportion to the missing taps rather
/// than being renormalised. Sequences shorter than the kernel, or holding a
/// NaN, come back unchanged.
pub fn moving_average(data: &[f64], width: usize) -> Vec<f64> {
    if width == 0 || data.len() < width || data.iter().any(|v| v.is_nan()) {
        return data.to_vec();
    }
    let tap = 1.0 / width as f64;
    let lead = width / 2;
    let lag = (width - 1) / 2;
    (0..data.len())
        .map(|i| {
            let from = i.saturating_sub(lead);
            let to = (i + lag).min(data.len() - 1);
            data[from..=to].iter().map(|v| v * tap).sum()
        })
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn preserves_length() {
        for len in [0usize, 3, 9, 10, 11, 57] {
            let data: Vec<f64> = (0..len).map(|i| i as f64).collect();
            assert_eq!(moving_average(&data, 10).len(), len);
        }
    }
    #[test]
    fn interior_is_the_plain_mean() {
        let data = vec![1.0; 30];
        let smoothed = moving_average(&data, 10);
        for v in &smoothed[5..26] {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }
    #[test]
    fn edges_use_truncated_support_over_full_width() {
        let data = vec![1.0; 12];
        let smoothed = moving_average(&data, 10);
        // head covers samples 0..=4, tail covers samples 6..=11
        assert!((smoothed[0] - 0.5).abs() < 1e-12);
        assert!((smoothed[1] - 0.6).abs() < 1e-12);
        assert!((smoothed[11] - 0.6).abs() < 1e-12);
        assert!((smoothed[10] - 0.7).abs() < 1e-12);
    }
    #[test]
    fn odd_width_is_symmetric() {
        let data = vec![3.0; 8];
        let smoothed = moving_average(&data, 3);
        assert!((smoothed[0] - 2.0).abs() < 1e-12);
        assert!((smoothed[4] - 3.0).abs() < 1e-12);
        assert!((smoothed[7] - 2.0).abs() < 1e-12);
    }
    #[test]
    fn ramp_interior_is_delayed_half_a_sample() {
        // even kernels lean one tap backwards, like a "same" convolution
        let data: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let smoothed = moving_average(&data, 10);
        assert!((smoothed[10] - 9.5).abs() < 1e-9);
    }
    #[test]
    fn short_or_nan_sequences_pass_through() {
        let short = vec![4.0, 5.0, 6.0];
        assert_eq!(moving_average(&short, 10), short);
        assert!(moving_average(&[], 10).is_empty());
        let with_nan = vec![1.0, f64::NAN, 2.0, 3.0];
        let out = moving_average(&with_nan, 2);
        assert_eq!(out[0], 1.0);
        assert!(out[1].is_nan());
        assert_eq!(out[3], 3.0);
    }
}

// src/signal/window.rs
use serde::Serialize;
/// A `(start, len)` view over a channel, in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: usize,
    pub len: usize,
}
/// Window geometry for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WindowPlan {
    pub window_length: usize,
    pub step_length: usize,
    pub window_count: usize,
}
impl WindowPlan {
    /// Plans windows of `window_seconds` worth of samples, capped at
    /// `total_samples / cap_divisor`, advancing by `1 - overlap_ratio` of a
    /// window. Degenerate input yields a plan with zero windows.
    pub fn new(
        total_samples: usize,
        sample_rate_hz: f64,
        window_seconds: f64,
        cap_divisor: usize,
        overlap_ratio: f64,
    ) -> Self {
        let nominal = (window_seconds * sample_rate_hz).floor();
        let nominal = if nominal.is_finite() && nominal > 0.0 {
            nominal as usize
        } else {
            0
        };
        let cap = total_samples.checked_div(cap_divisor).unwrap_or(total_samples);
        let window_length = nominal.min(cap);
        let step = (window_length as f64 * (1.0 - overlap_ratio)).floor();
        let step_length = if step.is_finite() && step > 0.0 {
            step as usize
        } else {
            0
        };
        let window_count = Self::count(total_samples, window_length, step_length);
        Self {
            window_length,
            step_length,
            window_count,
        }
    }
    /// `floor((total - window) / step) + 1`, or 0 when no full window fits.
    pub fn count(total_samples: usize, window_length: usize, step_length: usize) -> usize {
        if window_length == 0 || step_length == 0 || total_samples < window_length {
            return 0;
        }
        (total_samples - window_length) / step_length + 1
    }
    pub fn is_empty(&self) -> bool {
        self.window_count == 0
    }
    pub fn window(&self, index: usize) -> Option<Window> {
        (index < self.window_count).then(|| Window {
            start: index * self.step_length,
            len: self.window_length,
        })
    }
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        (0..self.window_count).filter_map(move |i| self.window(i))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ten_second_recording_at_2khz() {
        let plan = WindowPlan::new(20_000, 2000.0, 2.0, 5, 0.2);
        assert_eq!(plan.window_length, 4000);
        assert_eq!(plan.step_length, 3200);
        assert_eq!(plan.window_count, 6);
        let last = plan.window(5).unwrap();
        assert!(last.start + last.len <= 20_000);
        assert!(plan.window(6).is_none());
    }
    #[test]
    fn short_recordings_are_capped_to_a_fifth() {
        let plan = WindowPlan::new(1000, 2000.0, 2.0, 5, 0.5);
        assert_eq!(plan.window_length, 200);
        assert_eq!(plan.step_length, 100);
        assert_eq!(plan.window_count, 9);
    }
    #[test]
    fn count_matches_closed_form() {
        for total in [0usize, 1, 7, 50, 999, 4096] {
            for window in [1usize, 3, 10, 64] {
                for step in [1usize, 2, 5, 64] {
                    let expected = if total < window {
                        0
                    } else {
                        (total - window) / step + 1
                    };
                    assert_eq!(WindowPlan::count(total, window, step), expected);
                }
            }
        }
    }
    #[test]
    fn degenerate_input_plans_nothing() {
        assert!(WindowPlan::new(0, 2000.0, 2.0, 5, 0.2).is_empty());
        assert!(WindowPlan::new(4, 2000.0, 2.0, 5, 0.2).is_empty());
        // one-sample windows cannot advance with 50% overlap
        let plan = WindowPlan::new(5, 2000.0, 2.0, 5, 0.5);
        assert_eq!(plan.window_length, 1);
        assert_eq!(plan.step_length, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.windows().count(), 0);
    }
    #[test]
    fn windows_start_at_multiples_of_the_step() {
        let plan = WindowPlan::new(100, 10.0, 2.0, 5, 0.25);
        let starts: Vec<usize> = plan.windows().map(|w| w.start).collect();
        assert_eq!(plan.window_length, 20);
        assert_eq!(plan.step_length, 15);
        assert_eq!(starts, vec![0, 15, 30, 45, 60, 75]);
    }
}

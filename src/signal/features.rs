// src/signal/features.rs
use serde::Serialize;
/// Machine epsilon, the floor for every guarded denominator.
pub const EPS: f64 = f64::EPSILON;
/// The eight per-window workload metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MetricRecord {
    pub activation: f64,
    pub intensity: f64,
    pub force: f64,
    pub firing_rate: f64,
    pub fatigue_index: f64,
    pub velocity: f64,
    pub power_output: f64,
    pub work_ratio: f64,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Activation,
    Intensity,
    Force,
    FiringRate,
    FatigueIndex,
    Velocity,
    PowerOutput,
    WorkRatio,
}
impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Activation,
        Metric::Intensity,
        Metric::Force,
        Metric::FiringRate,
        Metric::FatigueIndex,
        Metric::Velocity,
        Metric::PowerOutput,
        Metric::WorkRatio,
    ];
    pub fn name(self) -> &'static str {
        match self {
            Metric::Activation => "activation",
            Metric::Intensity => "intensity",
            Metric::Force => "force",
            Metric::FiringRate => "firing_rate",
            Metric::FatigueIndex => "fatigue_index",
            Metric::Velocity => "velocity",
            Metric::PowerOutput => "power_output",
            Metric::WorkRatio => "work_ratio",
        }
    }
}
impl MetricRecord {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Activation => self.activation,
            Metric::Intensity => self.intensity,
            Metric::Force => self.force,
            Metric::FiringRate => self.firing_rate,
            Metric::FatigueIndex => self.fatigue_index,
            Metric::Velocity => self.velocity,
            Metric::PowerOutput => self.power_output,
            Metric::WorkRatio => self.work_ratio,
        }
    }
    pub fn set(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Activation => &mut self.activation,
            Metric::Intensity => &mut self.intensity,
            Metric::Force => &mut self.force,
            Metric::FiringRate => &mut self.firing_rate,
            Metric::FatigueIndex => &mut self.fatigue_index,
            Metric::Velocity => &mut self.velocity,
            Metric::PowerOutput => &mut self.power_output,
            Metric::WorkRatio => &mut self.work_ratio,
        };
        *slot = value;
    }
}
/// Root-mean-square; 0 for an empty segment.
pub fn rms(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return 0.0;
    }
    (segment.iter().map(|x| x * x).sum::<f64>() / segment.len() as f64).sqrt()
}
/// Integrated EMG, the sum of absolute sample values.
pub fn iemg(segment: &[f64]) -> f64 {
    segment.iter().map(|x| x.abs()).sum()
}
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
/// Zero crossings per sample: `sum(|diff(sign(x))|) / (2 * len)`. A pass
/// through an exact zero counts as two half steps, i.e. one crossing.
pub fn firing_rate(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return 0.0;
    }
    let steps: f64 = segment
        .windows(2)
        .map(|pair| (sign(pair[1]) - sign(pair[0])).abs())
        .sum();
    steps / (2.0 * segment.len() as f64)
}
/// `numerator / max(denominator, EPS)`, short-circuiting to 0 when the
/// denominator is exactly zero.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator.max(EPS)
}
/// Normalised drop of the current mean frequency below the baseline.
pub fn fatigue_index(baseline_mnf: f64, current_mnf: f64, fatigue_threshold: f64) -> f64 {
    guarded_ratio(baseline_mnf - current_mnf, baseline_mnf - fatigue_threshold)
}
/// Mean of the running integral of acceleration, `cumsum(acc) / fs`.
/// `None` when there are no motion samples in the window.
pub fn mean_velocity(acceleration: &[f64], sample_rate_hz: f64) -> Option<f64> {
    if acceleration.is_empty() {
        return None;
    }
    let mut running = 0.0;
    let mut total = 0.0;
    for a in acceleration {
        running += a;
        total += running / sample_rate_hz;
    }
    Some(total / acceleration.len() as f64)
}
/// Series-wide inputs shared by every window of a run.
#[derive(Clone, Copy, Debug)]
pub struct FeatureExtractor {
    series_max_abs: f64,
    motion_rate_hz: f64,
    fatigue_threshold: f64,
}
impl FeatureExtractor {
    pub fn new(series_max_abs: f64, motion_rate_hz: f64, fatigue_threshold: f64) -> Self {
        Self {
            series_max_abs,
            motion_rate_hz,
            fatigue_threshold,
        }
    }
    pub fn series_max_abs(&self) -> f64 {
        self.series_max_abs
    }
    pub fn extract(
        &self,
        emg: &[f64],
        motion: &[f64],
        current_mnf: f64,
        baseline_mnf: f64,
    ) -> MetricRecord {
        let intensity = rms(emg);
        let velocity = mean_velocity(motion, self.motion_rate_hz);
        let power_output = match velocity {
            Some(v) if !emg.is_empty() => intensity * v,
            _ => 0.0,
        };
        MetricRecord {
            activation: intensity / (self.series_max_abs + EPS),
            intensity,
            force: intensity * intensity,
            firing_rate: firing_rate(emg),
            fatigue_index: fatigue_index(baseline_mnf, current_mnf, self.fatigue_threshold),
            velocity: velocity.unwrap_or(0.0),
            power_output,
            work_ratio: guarded_ratio(iemg(emg), power_output),
        }
    }
}

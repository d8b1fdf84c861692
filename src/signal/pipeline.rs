use std::thread;
use log::{debug, info};
use serde::Serialize;
use crate::signal::baseline::FatigueBaseline;
use crate::signal::config::AnalysisConfig;
use crate::signal::features::{FeatureExtractor, Metric, MetricRecord};
use crate::signal::smoothing::moving_average;
use crate::signal::spectrum::WelchEstimator;
use crate::signal::summary::final_percent;
use crate::signal::window::WindowPlan;
use crate::signal::{ChannelSeries, MyoError};
/// Column-per-metric view of a run, one entry per window.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricSeries {
    pub activation: Vec<f64>,
    pub intensity: Vec<f64>,
    pub force: Vec<f64>,
    pub firing_rate: Vec<f64>,
    pub fatigue_index: Vec<f64>,
    pub velocity: Vec<f64>,
    pub power_output: Vec<f64>,
    pub work_ratio: Vec<f64>,
}
impl MetricSeries {
    pub fn from_records(records: &[MetricRecord]) -> Self {
        let mut series = Self::default();
        for metric in Metric::ALL {
            *series.column_mut(metric) = records.iter().map(|r| r.get(metric)).collect();
        }
        series
    }
    pub fn get(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Activation => &self.activation,
            Metric::Intensity => &self.intensity,
            Metric::Force => &self.force,
            Metric::FiringRate => &self.firing_rate,
            Metric::FatigueIndex => &self.fatigue_index,
            Metric::Velocity => &self.velocity,
            Metric::PowerOutput => &self.power_output,
            Metric::WorkRatio => &self.work_ratio,
        }
    }
    fn column_mut(&mut self, metric: Metric) -> &mut Vec<f64> {
        match metric {
            Metric::Activation => &mut self.activation,
            Metric::Intensity => &mut self.intensity,
            Metric::Force => &mut self.force,
            Metric::FiringRate => &mut self.firing_rate,
            Metric::FatigueIndex => &mut self.fatigue_index,
            Metric::Velocity => &mut self.velocity,
            Metric::PowerOutput => &mut self.power_output,
            Metric::WorkRatio => &mut self.work_ratio,
        }
    }
    pub fn len(&self) -> usize {
        self.activation.len()
    }
    pub fn is_empty(&self) -> bool {
        self.activation.is_empty()
    }
    /// Moving average applied to each metric independently.
    pub fn smoothed(&self, width: usize) -> Self {
        let mut out = Self::default();
        for metric in Metric::ALL {
            *out.column_mut(metric) = moving_average(self.get(metric), width);
        }
        out
    }
    pub fn record(&self, index: usize) -> Option<MetricRecord> {
        if index >= self.len() {
            return None;
        }
        let mut record = MetricRecord::default();
        for metric in Metric::ALL {
            record.set(metric, self.get(metric)[index]);
        }
        Some(record)
    }
    pub fn records(&self) -> Vec<MetricRecord> {
        (0..self.len()).filter_map(|i| self.record(i)).collect()
    }
}
/// Outcome of one run: raw and smoothed metrics plus the headline scores.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunResult {
    pub plan: WindowPlan,
    pub raw: MetricSeries,
    pub smoothed: MetricSeries,
    pub final_activation: f64,
    pub final_fatigue_score: f64,
}
impl RunResult {
    pub fn window_count(&self) -> usize {
        self.raw.len()
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// No window processed, baseline unset.
    Uninitialized,
    /// The first window fixed the baseline.
    Baselined,
    /// Later windows are being measured against the baseline.
    Accumulating,
}
/// A run in progress, advanced one window per `pump_once`.
///
/// Windows are strictly sequential: the first window fixes the fatigue
/// baseline every later window is compared against.
pub struct WindowRun<'a> {
    emg: &'a ChannelSeries,
    motion: &'a ChannelSeries,
    plan: WindowPlan,
    estimator: WelchEstimator,
    extractor: FeatureExtractor,
    baseline: FatigueBaseline,
    next_window: usize,
    records: Vec<MetricRecord>,
    smoothing_width: usize,
}
impl<'a> WindowRun<'a> {
    fn new(config: &AnalysisConfig, emg: &'a ChannelSeries, motion: &'a ChannelSeries) -> Self {
        let plan = WindowPlan::new(
            emg.len(),
            emg.sample_rate_hz(),
            config.window_seconds,
            config.window_cap_divisor,
            config.overlap_ratio,
        );
        let nfft = config.min_nfft.max(plan.window_length);
        let estimator = WelchEstimator::new(plan.window_length, config.welch_overlap, nfft);
        let extractor = FeatureExtractor::new(
            emg.max_abs(),
            motion.sample_rate_hz(),
            config.fatigue_threshold,
        );
        debug!(
            "planned {} windows of {} samples (step {}, nfft {})",
            plan.window_count,
            plan.window_length,
            plan.step_length,
            estimator.nfft()
        );
        Self {
            emg,
            motion,
            plan,
            estimator,
            extractor,
            baseline: FatigueBaseline::new(),
            next_window: 0,
            records: Vec::with_capacity(plan.window_count),
            smoothing_width: config.smoothing_width,
        }
    }
    pub fn plan(&self) -> WindowPlan {
        self.plan
    }
    pub fn phase(&self) -> RunPhase {
        match (self.baseline.is_set(), self.records.len()) {
            (false, _) => RunPhase::Uninitialized,
            (true, 1) => RunPhase::Baselined,
            (true, _) => RunPhase::Accumulating,
        }
    }
    pub fn remaining(&self) -> usize {
        self.plan.window_count - self.next_window
    }
    /// Measures the next window, or returns `None` once every window is done.
    pub fn pump_once(&mut self) -> Option<MetricRecord> {
        let window = self.plan.window(self.next_window)?;
        let emg = self.emg.segment(window.start, window.len);
        // Motion is sliced at the EMG sample indices.
        let motion = self.motion.segment(window.start, window.len);
        let mnf = self.estimator.mean_frequency(emg, self.emg.sample_rate_hz());
        let baseline = self.baseline.observe(mnf);
        let record = self.extractor.extract(emg, motion, mnf, baseline);
        debug!(
            "window {}/{}: mnf {:.3} Hz, activation {:.4}, fatigue {:.4}",
            self.next_window + 1,
            self.plan.window_count,
            mnf,
            record.activation,
            record.fatigue_index
        );
        self.records.push(record);
        self.next_window += 1;
        Some(record)
    }
    /// Smooths and summarises the windows measured so far.
    pub fn finish(self) -> RunResult {
        let raw = MetricSeries::from_records(&self.records);
        let smoothed = raw.smoothed(self.smoothing_width);
        let final_activation = final_percent(&smoothed.activation);
        let final_fatigue_score = final_percent(&smoothed.fatigue_index);
        info!(
            "run finished: {} windows, activation {:.2}%, fatigue {:.2}%",
            raw.len(),
            final_activation,
            final_fatigue_score
        );
        RunResult {
            plan: self.plan,
            raw,
            smoothed,
            final_activation,
            final_fatigue_score,
        }
    }
}
impl Iterator for WindowRun<'_> {
    type Item = MetricRecord;
    fn next(&mut self) -> Option<Self::Item> {
        self.pump_once()
    }
}
/// Batch transform from an EMG/motion channel pair to per-window metrics.
#[derive(Clone, Debug)]
pub struct MetricPipeline {
    config: AnalysisConfig,
}
impl MetricPipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self, MyoError> {
        config.validate()?;
        Ok(Self { config })
    }
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
    pub fn start<'a>(&self, emg: &'a ChannelSeries, motion: &'a ChannelSeries) -> WindowRun<'a> {
        WindowRun::new(&self.config, emg, motion)
    }
    pub fn run(&self, emg: &ChannelSeries, motion: &ChannelSeries) -> RunResult {
        let mut run = self.start(emg, motion);
        while run.pump_once().is_some() {}
        run.finish()
    }
    /// Runs independent channel pairs on their own threads. Results keep the
    /// input order.
    pub fn run_channels(&self, pairs: &[(ChannelSeries, ChannelSeries)]) -> Vec<RunResult> {
        thread::scope(|scope| {
            let handles: Vec<_> = pairs
                .iter()
                .map(|(emg, motion)| scope.spawn(move || self.run(emg, motion)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        })
    }
}

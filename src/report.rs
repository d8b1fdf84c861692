use serde::Serialize;
use crate::signal::{ActivationStatus, MetricRecord, RunResult, WindowPlan};
/// One smoothed window, ready to be stored by a consumer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowReport {
    pub index: usize,
    pub start_seconds: f64,
    pub status: ActivationStatus,
    #[serde(flatten)]
    pub metrics: MetricRecord,
}
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub session: String,
    pub channel: usize,
    pub plan: WindowPlan,
    pub windows: Vec<WindowReport>,
    pub final_activation: f64,
    pub final_fatigue_score: f64,
}
impl RunReport {
    pub fn new(session: impl Into<String>, channel: usize, emg_rate_hz: f64, result: &RunResult) -> Self {
        let windows = result
            .smoothed
            .records()
            .into_iter()
            .enumerate()
            .map(|(index, metrics)| WindowReport {
                index,
                start_seconds: (index * result.plan.step_length) as f64 / emg_rate_hz,
                status: ActivationStatus::classify(metrics.activation),
                metrics,
            })
            .collect();
        Self {
            session: session.into(),
            channel,
            plan: result.plan,
            windows,
            final_activation: result.final_activation,
            final_fatigue_score: result.final_fatigue_score,
        }
    }
    /// `session channel windows activation% fatigue%` on one line.
    pub fn summary_line(&self) -> String {
        format!(
            "{} ch{}: {} windows, final_activation={:.2}, final_fatigue={:.2}",
            self.session,
            self.channel,
            self.windows.len(),
            self.final_activation,
            self.final_fatigue_score
        )
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::MetricSeries;
    fn result() -> RunResult {
        let records = vec![
            MetricRecord { activation: 0.2, fatigue_index: 0.0, ..MetricRecord::default() },
            MetricRecord { activation: 0.9, fatigue_index: 0.3, ..MetricRecord::default() },
        ];
        let raw = MetricSeries::from_records(&records);
        RunResult {
            plan: WindowPlan { window_length: 4000, step_length: 3200, window_count: 2 },
            smoothed: raw.clone(),
            raw,
            final_activation: 90.0,
            final_fatigue_score: 30.0,
        }
    }
    #[test]
    fn windows_carry_timing_and_status() {
        let report = RunReport::new("session_T1", 0, 2000.0, &result());
        assert_eq!(report.windows.len(), 2);
        assert_eq!(report.windows[1].start_seconds, 1.6);
        assert_eq!(report.windows[0].status, ActivationStatus::WarmUp);
        assert_eq!(report.windows[1].status, ActivationStatus::OverActivation);
        assert!(report.summary_line().starts_with("session_T1 ch0: 2 windows"));
    }
    #[test]
    fn metrics_are_flattened_into_each_window() {
        let report = RunReport::new("s", 1, 2000.0, &result());
        let json = serde_json::to_value(&report).unwrap();
        let window = &json["windows"][1];
        assert_eq!(window["activation"], 0.9);
        assert_eq!(window["status"], "Over-activation");
        assert_eq!(json["windows"][0]["status"], "Warm-up");
        assert_eq!(json["plan"]["window_count"], 2);
    }
}

//! Windowed workload and fatigue metrics from paired EMG and motion channels.
//!
//! `signal` holds the batch transform itself; `recording`, `synth`, `config`
//! and `report` are the file formats and settings around it.
pub mod config;
pub mod recording;
pub mod report;
pub mod signal;
pub mod synth;
pub use config::SessionConfig;
pub use recording::{ColumnLayout, Recording, SessionRecording};
pub use report::{RunReport, WindowReport};
pub use signal::{AnalysisConfig, ChannelSeries, MetricPipeline, MetricRecord, MyoError, RunResult};

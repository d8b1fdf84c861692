// src/signal/mod.rs
// Windowed EMG analysis: planning, spectral estimate, per-window metrics,
// smoothing and headline scores.
pub mod baseline;
pub mod config;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod series;
pub mod smoothing;
pub mod spectrum;
pub mod summary;
pub mod window;
pub use baseline::FatigueBaseline;
pub use config::AnalysisConfig;
pub use error::MyoError;
pub use features::{FeatureExtractor, Metric, MetricRecord};
pub use pipeline::{MetricPipeline, MetricSeries, RunPhase, RunResult, WindowRun};
pub use series::ChannelSeries;
pub use smoothing::moving_average;
pub use spectrum::{PowerSpectrum, WelchEstimator};
pub use summary::ActivationStatus;
pub use window::{Window, WindowPlan};

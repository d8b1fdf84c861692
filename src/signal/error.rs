use thiserror::Error;
#[derive(Debug, Error)]
pub enum MyoError {
    #[error("sample rate must be a finite value greater than zero, got {0}")]
    InvalidSampleRate(f64),
    #[error("{field} must lie in [0, 1), got {value}")]
    InvalidOverlap { field: &'static str, value: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("recording has {actual} columns, none of the expected {expected:?} are present")]
    MissingColumns { expected: Vec<usize>, actual: usize },
    #[error("channel {channel} requested, recording has {available}")]
    NoSuchChannel { channel: usize, available: usize },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unreadable table: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed table: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to decode configuration: {0}")]
    Json(#[from] serde_json::Error),
}

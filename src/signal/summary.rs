use serde::Serialize;
/// Coarse training phase read off a window's activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActivationStatus {
    #[serde(rename = "Warm-up")]
    WarmUp,
    Plateau,
    #[serde(rename = "Over-activation")]
    OverActivation,
}
impl ActivationStatus {
    pub fn classify(activation: f64) -> Self {
        if activation < 0.4 {
            ActivationStatus::WarmUp
        } else if activation < 0.8 {
            ActivationStatus::Plateau
        } else {
            ActivationStatus::OverActivation
        }
    }
}
/// Last value of a smoothed sequence as a percentage, 0 when empty.
pub fn final_percent(sequence: &[f64]) -> f64 {
    sequence.last().map_or(0.0, |v| v * 100.0)
}

/// Reference mean frequency for one run, fixed by the first window.
///
/// A fresh instance belongs to every run; nothing here is shared between runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FatigueBaseline {
    initial_mnf: Option<f64>,
}
impl FatigueBaseline {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_set(&self) -> bool {
        self.initial_mnf.is_some()
    }
    pub fn get(&self) -> Option<f64> {
        self.initial_mnf
    }
    /// Records `mnf` if no baseline exists yet and returns the baseline in force.
    pub fn observe(&mut self, mnf: f64) -> f64 {
        *self.initial_mnf.get_or_insert(mnf)
    }
}

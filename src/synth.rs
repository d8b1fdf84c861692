// src/synth.rs
// Synthetic EMG / trajectory recordings in the tab-delimited format read by
// `recording::Recording`.
use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use log::info;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use crate::recording::table_writer;
use crate::signal::MyoError;
/// Sine-plus-noise EMG whose sine component swells over the recording.
#[derive(Clone, Debug)]
pub struct EmgProfile {
    pub duration_s: f64,
    pub sample_rate_hz: f64,
    pub channels: Vec<String>,
    pub base_freq_hz: f64,
    /// Standard deviation of the per-channel frequency offset.
    pub freq_jitter_hz: f64,
    pub amplitude: f64,
    pub noise_level: f64,
    /// Envelope rises linearly from 0 to this gain.
    pub ramp_gain: f64,
}
impl Default for EmgProfile {
    fn default() -> Self {
        Self {
            duration_s: 10.0,
            sample_rate_hz: 2000.0,
            channels: ["L_BF", "L_VL", "R_BF", "R_VL"].map(String::from).to_vec(),
            base_freq_hz: 30.0,
            freq_jitter_hz: 5.0,
            amplitude: 0.02,
            noise_level: 0.005,
            ramp_gain: 0.3,
        }
    }
}
/// Marker trajectories: offset, drift, random walk, slow sway and jitter.
#[derive(Clone, Debug)]
pub struct TrajectoryProfile {
    pub duration_s: f64,
    pub sample_rate_hz: f64,
    pub columns: Vec<String>,
    pub base_level: f64,
    pub base_jitter: f64,
    pub trend: f64,
    pub walk_step: f64,
    pub sway_amplitude: f64,
    pub sway_freq_hz: f64,
    pub noise_level: f64,
}
impl Default for TrajectoryProfile {
    fn default() -> Self {
        Self {
            duration_s: 10.0,
            sample_rate_hz: 200.0,
            columns: ["RASISX", "RASISY", "RASISZ", "LASISX", "LASISY", "LASISZ"]
                .map(String::from)
                .to_vec(),
            base_level: 600.0,
            base_jitter: 30.0,
            trend: 20.0,
            walk_step: 0.1,
            sway_amplitude: 5.0,
            sway_freq_hz: 0.3,
            noise_level: 0.5,
        }
    }
}
/// Generated table: a time column plus one column per channel.
#[derive(Clone, Debug)]
pub struct SyntheticTable {
    pub labels: Vec<String>,
    pub time: Vec<f64>,
    pub columns: Vec<Vec<f64>>,
}
fn normal(std_dev: f64) -> Result<Normal<f64>, MyoError> {
    Normal::new(0.0, std_dev)
        .map_err(|e| MyoError::InvalidConfig(format!("bad standard deviation {std_dev}: {e}")))
}
fn sample_count(duration_s: f64, sample_rate_hz: f64) -> usize {
    (duration_s * sample_rate_hz).max(0.0) as usize
}
fn time_axis(n: usize, duration_s: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * duration_s / n as f64).collect()
}
/// `n` evenly spaced points from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
impl EmgProfile {
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<SyntheticTable, MyoError> {
        let n = sample_count(self.duration_s, self.sample_rate_hz);
        let time = time_axis(n, self.duration_s);
        let ramp = linspace(0.0, self.ramp_gain, n);
        let jitter = normal(self.freq_jitter_hz)?;
        let noise = normal(self.noise_level)?;
        let columns = self
            .channels
            .iter()
            .map(|_| {
                let phase = rng.gen::<f64>() * 2.0 * PI;
                let freq = self.base_freq_hz + jitter.sample(rng);
                time.iter()
                    .zip(&ramp)
                    .map(|(t, r)| {
                        let sine = self.amplitude * (2.0 * PI * freq * t + phase).sin();
                        sine * r + noise.sample(rng)
                    })
                    .collect()
            })
            .collect();
        Ok(SyntheticTable {
            labels: self.channels.clone(),
            time,
            columns,
        })
    }
}
impl TrajectoryProfile {
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<SyntheticTable, MyoError> {
        let n = sample_count(self.duration_s, self.sample_rate_hz);
        let time = time_axis(n, self.duration_s);
        let trend = linspace(0.0, self.trend, n);
        let unit = normal(1.0)?;
        let columns = self
            .columns
            .iter()
            .map(|_| {
                let phase = rng.gen::<f64>() * 2.0 * PI;
                let base = self.base_level + unit.sample(rng) * self.base_jitter;
                let mut walk = 0.0;
                time.iter()
                    .zip(&trend)
                    .map(|(t, drift)| {
                        walk += unit.sample(rng) * self.walk_step;
                        let sway =
                            self.sway_amplitude * (2.0 * PI * self.sway_freq_hz * t + phase).sin();
                        base + drift + walk + sway + unit.sample(rng) * self.noise_level
                    })
                    .collect()
            })
            .collect();
        Ok(SyntheticTable {
            labels: self.columns.clone(),
            time,
            columns,
        })
    }
}
impl SyntheticTable {
    pub fn samples(&self) -> usize {
        self.time.len()
    }
    /// Writes `Time\t<labels>` then one row per sample at fixed precision.
    pub fn write<W: Write>(&self, out: W, decimals: usize) -> Result<(), MyoError> {
        let mut writer = table_writer(out);
        writer.write_record(std::iter::once("Time").chain(self.labels.iter().map(String::as_str)))?;
        for (i, t) in self.time.iter().enumerate() {
            let row = std::iter::once(*t).chain(self.columns.iter().map(|column| column[i]));
            writer.write_record(row.map(|v| format!("{v:.decimals$}")))?;
        }
        writer.flush()?;
        Ok(())
    }
    pub fn save(&self, path: &Path, decimals: usize) -> Result<(), MyoError> {
        self.write(File::create(path)?, decimals)
    }
}
/// Writes `count` paired sessions as `EMG/T<i>.txt` and
/// `Trajectories/T<i>.txt` under `out_dir`.
pub fn write_sessions<R: Rng>(
    out_dir: &Path,
    count: usize,
    emg: &EmgProfile,
    trajectory: &TrajectoryProfile,
    rng: &mut R,
) -> Result<Vec<(PathBuf, PathBuf)>, MyoError> {
    let emg_dir = out_dir.join("EMG");
    let traj_dir = out_dir.join("Trajectories");
    fs::create_dir_all(&emg_dir)?;
    fs::create_dir_all(&traj_dir)?;
    let mut written = Vec::with_capacity(count);
    for i in 1..=count {
        let name = format!("T{i}.txt");
        let emg_path = emg_dir.join(&name);
        let traj_path = traj_dir.join(&name);
        let emg_table = emg.generate(rng)?;
        emg_table.save(&emg_path, 6)?;
        let traj_table = trajectory.generate(rng)?;
        traj_table.save(&traj_path, 3)?;
        info!(
            "wrote {} ({} samples) and {} ({} samples)",
            emg_path.display(),
            emg_table.samples(),
            traj_path.display(),
            traj_table.samples()
        );
        written.push((emg_path, traj_path));
    }
    Ok(written)
}

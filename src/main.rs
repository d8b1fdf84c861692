// src/main.rs
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use myoload::synth::{self, EmgProfile, TrajectoryProfile};
use myoload::{ColumnLayout, MetricPipeline, Recording, RunReport, SessionConfig, SessionRecording};
#[derive(Parser, Debug)]
#[command(name = "myoload", version, about = "EMG workload and fatigue metrics")]
struct Cli {
    /// JSON session configuration; flags override its fields.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}
#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse one EMG/motion file pair and print a JSON report.
    Process {
        #[arg(long)]
        emg: PathBuf,
        #[arg(long)]
        motion: PathBuf,
        #[command(flatten)]
        session: SessionArgs,
        /// Analyse every EMG channel in parallel instead of one.
        #[arg(long)]
        all_channels: bool,
    },
    /// Analyse every `<name>.txt` present in both directories.
    Batch {
        #[arg(long)]
        emg_dir: PathBuf,
        #[arg(long)]
        motion_dir: PathBuf,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Write synthetic EMG and trajectory recordings.
    Generate {
        #[arg(long, default_value = "synthetic")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 3)]
        files: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}
#[derive(clap::Args, Debug)]
struct SessionArgs {
    #[arg(long)]
    channel: Option<usize>,
    #[arg(long)]
    emg_rate: Option<f64>,
    #[arg(long)]
    motion_rate: Option<f64>,
    #[arg(long)]
    overlap: Option<f64>,
    #[arg(long)]
    fatigue_threshold: Option<f64>,
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,
}
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Lab,
    Synthetic,
}
impl SessionArgs {
    fn apply(&self, config: &mut SessionConfig) {
        if let Some(channel) = self.channel {
            config.channel = channel;
        }
        if let Some(rate) = self.emg_rate {
            config.emg_rate_hz = rate;
        }
        if let Some(rate) = self.motion_rate {
            config.motion_rate_hz = rate;
        }
        if let Some(overlap) = self.overlap {
            config.analysis.overlap_ratio = overlap;
        }
        if let Some(threshold) = self.fatigue_threshold {
            config.analysis.fatigue_threshold = threshold;
        }
        match self.layout {
            Some(LayoutArg::Lab) => config.layout = ColumnLayout::lab(),
            Some(LayoutArg::Synthetic) => config.layout = ColumnLayout::synthetic(),
            None => {}
        }
    }
}
fn session_config(path: Option<&Path>, args: &SessionArgs) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}
fn load_session(emg: &Path, motion: &Path, config: &SessionConfig) -> Result<SessionRecording> {
    let emg_rec = Recording::load(emg).with_context(|| format!("reading {}", emg.display()))?;
    let motion_rec =
        Recording::load(motion).with_context(|| format!("reading {}", motion.display()))?;
    Ok(SessionRecording::new(&emg_rec, &motion_rec, &config.layout)?)
}
fn analyse(
    name: &str,
    emg: &Path,
    motion: &Path,
    config: &SessionConfig,
    all_channels: bool,
) -> Result<Vec<RunReport>> {
    let session = load_session(emg, motion, config)?;
    if session.samples() == 0 {
        warn!("{name}: recording holds no samples");
    }
    let pipeline = MetricPipeline::new(config.analysis.clone())?;
    let channels: Vec<usize> = if all_channels {
        (0..session.emg_channels()).collect()
    } else {
        vec![config.channel]
    };
    let pairs = channels
        .iter()
        .map(|&ch| session.channel_pair(ch, config.emg_rate_hz, config.motion_rate_hz))
        .collect::<Result<Vec<_>, _>>()?;
    let results = pipeline.run_channels(&pairs);
    Ok(channels
        .iter()
        .zip(&results)
        .map(|(&ch, result)| RunReport::new(name, ch, config.emg_rate_hz, result))
        .collect())
}
fn session_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_owned());
    format!("session_{stem}")
}
fn run_batch(emg_dir: &Path, motion_dir: &Path, config: &SessionConfig) -> Result<()> {
    let mut emg_files: Vec<PathBuf> = fs::read_dir(emg_dir)
        .with_context(|| format!("listing {}", emg_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    emg_files.sort();
    if emg_files.is_empty() {
        bail!("no .txt recordings in {}", emg_dir.display());
    }
    for emg_path in emg_files {
        let Some(file_name) = emg_path.file_name() else {
            continue;
        };
        let motion_path = motion_dir.join(file_name);
        if !motion_path.exists() {
            warn!("no motion file for {}, skipping", emg_path.display());
            continue;
        }
        let name = session_name(&emg_path);
        info!("processing {name}");
        for report in analyse(&name, &emg_path, &motion_path, config, false)? {
            println!("{}", report.summary_line());
        }
    }
    Ok(())
}
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Process {
            emg,
            motion,
            session,
            all_channels,
        } => {
            let config = session_config(cli.config.as_deref(), &session)?;
            let reports = analyse(&session_name(&emg), &emg, &motion, &config, all_channels)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Command::Batch {
            emg_dir,
            motion_dir,
            session,
        } => {
            let config = session_config(cli.config.as_deref(), &session)?;
            run_batch(&emg_dir, &motion_dir, &config)?;
        }
        Command::Generate {
            out_dir,
            files,
            seed,
        } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let written = synth::write_sessions(
                &out_dir,
                files,
                &EmgProfile::default(),
                &TrajectoryProfile::default(),
                &mut rng,
            )?;
            info!("generated {} sessions under {}", written.len(), out_dir.display());
        }
    }
    Ok(())
}

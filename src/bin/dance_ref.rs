use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dance_coach::error::{ErrorCode, RecordingError};
use dance_coach::pose::{synthesize, write_segment, SyntheticSpec};
use dance_coach::selection::{process_directory, RecordingCatalog, ReferenceWindowSelector};
use dance_coach::{AppConfig, Recording};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dance_ref",
    about = "Extract steady reference segments from recorded dance poses"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// JSON configuration file (defaults are used when omitted or invalid)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the reference window length in frames
    #[arg(long)]
    window_size: Option<usize>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from_file(path),
            None => AppConfig::default(),
        };
        if let Some(window_size) = self.window_size {
            if window_size == 0 {
                bail!("Window size must be at least 1");
            }
            config.selection.window_size = window_size;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a reference segment for every recording in a directory
    Extract {
        #[arg(long)]
        input_dir: PathBuf,
        /// Destination for segments (defaults to the input directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print transition scores and the best window for one recording
    Score {
        #[arg(long)]
        recording: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Write a deterministic synthetic recording
    Synthesize {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 60)]
        frames: usize,
        #[arg(long, default_value_t = 20)]
        calm_start: usize,
        #[arg(long, default_value_t = 26)]
        calm_frames: usize,
        #[arg(long, default_value_t = 0.02)]
        jitter: f64,
        #[arg(long, default_value_t = 0x5A5A_FFF0)]
        seed: u64,
    },
    /// List recordings discoverable in a directory
    List {
        #[arg(long)]
        input_dir: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            input_dir,
            output_dir,
            config,
        } => run_extract(&input_dir, output_dir, &config.resolve()?),
        Commands::Score { recording, config } => run_score(&recording, &config.resolve()?),
        Commands::Synthesize {
            output,
            frames,
            calm_start,
            calm_frames,
            jitter,
            seed,
        } => {
            let spec = SyntheticSpec {
                frames,
                calm_start,
                calm_frames,
                jitter,
                seed,
            };
            run_synthesize(&output, &spec)
        }
        Commands::List { input_dir, config } => run_list(&input_dir, &config.resolve()?),
    }
}

fn run_extract(input_dir: &Path, output_dir: Option<PathBuf>, config: &AppConfig) -> Result<ExitCode> {
    let output_dir = output_dir.unwrap_or_else(|| input_dir.to_path_buf());
    let report = process_directory(input_dir, &output_dir, &config.selection, &config.schema)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(0))
}

fn run_score(path: &Path, config: &AppConfig) -> Result<ExitCode> {
    let recording = Recording::load(path, &config.selection.input_suffix)
        .with_context(|| format!("loading {}", path.display()))?;
    let selector = ReferenceWindowSelector::new(config.selection.window_size, config.schema.clone());

    match selector.evaluate(&recording.frames) {
        Ok((scores, best)) => {
            let report = ScoreReport {
                recording: &recording.name,
                frames: recording.len(),
                window_size: selector.window_size(),
                start_frame: best.start + 1,
                score: best.score,
                transition_scores: &scores,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::from(0))
        }
        Err(err) => {
            emit_skip(&recording.name, &err)?;
            Ok(ExitCode::from(2))
        }
    }
}

fn run_synthesize(output: &Path, spec: &SyntheticSpec) -> Result<ExitCode> {
    let config = AppConfig::default();
    let frames = synthesize(spec, &config.schema).map_err(|reason| anyhow!(reason))?;
    write_segment(output, &frames, config.selection.output_indent)
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Wrote {} frames to {} (calm frames {}..{})",
        frames.len(),
        output.display(),
        spec.calm_start + 1,
        spec.calm_start + spec.calm_frames
    );
    Ok(ExitCode::from(0))
}

fn run_list(input_dir: &Path, config: &AppConfig) -> Result<ExitCode> {
    let catalog = RecordingCatalog::new(input_dir, config.selection.input_suffix.clone());
    let recordings = catalog.discover()?;
    if recordings.is_empty() {
        println!("No recordings found under {}", catalog.root().display());
        return Ok(ExitCode::from(0));
    }

    for metadata in recordings {
        let output = config.selection.output_file_name(&metadata.name);
        if input_dir.join(&output).exists() {
            println!("{} -> {}", metadata.name, output);
        } else {
            println!("{}", metadata.name);
        }
    }
    Ok(ExitCode::from(0))
}

fn emit_skip(name: &str, err: &RecordingError) -> Result<()> {
    let json = serde_json::json!({
        "recording": name,
        "skipped": true,
        "code": err.code(),
        "reason": err.message(),
    });
    eprintln!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    recording: &'a str,
    frames: usize,
    window_size: usize,
    /// 1-based
    start_frame: usize,
    score: f64,
    transition_scores: &'a [f64],
}

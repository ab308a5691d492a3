use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stepflow_motion::{
    config::Config,
    motion::{MotionData, MotionLoader, PredictionResult},
    prediction::PredictionEngine,
    MotionError,
};

#[derive(Parser)]
#[command(
    name = "stepflow-motion",
    version,
    about = "Score recorded dance motion for timing and movement quality",
    long_about = "StepFlow Motion reads pose-keypoint recordings (JSON), scores them against the music tempo and for movement quality, and prints coaching feedback with an overall 0-100 score."
)]
struct Cli {
    /// Motion recordings (JSON with frames, optional audio_bpm)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Music tempo to score against, overriding any tempo in the inputs
    #[arg(long)]
    bpm: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Outcome for one input file
#[derive(Serialize)]
struct Report {
    input: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<PredictionResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting StepFlow Motion v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;
    if cli.pretty {
        config.output.pretty = true;
    }

    // Load every recording concurrently
    let handles: Vec<_> = cli
        .inputs
        .iter()
        .cloned()
        .map(|path| tokio::spawn(async move { MotionLoader::load(&path).await }))
        .collect();

    let mut loaded: Vec<std::result::Result<MotionData, MotionError>> = Vec::with_capacity(handles.len());
    for handle in handles {
        let mut recording = handle.await.context("motion loading task panicked")?;
        if let (Ok(data), Some(bpm)) = (&mut recording, cli.bpm) {
            data.audio_bpm = Some(bpm);
        }
        loaded.push(recording);
    }

    let engine = PredictionEngine::new(config);

    let mut reports: Vec<Option<Report>> = cli.inputs.iter().map(|_| None).collect();
    let mut pending = Vec::new();
    let mut recordings = Vec::new();
    for (index, recording) in loaded.into_iter().enumerate() {
        match recording {
            Ok(data) => {
                pending.push(index);
                recordings.push(data);
            }
            Err(e) => reports[index] = Some(report(&cli.inputs[index], Err(e))),
        }
    }

    for (index, outcome) in pending.into_iter().zip(engine.predict_batch(&recordings)) {
        reports[index] = Some(report(&cli.inputs[index], outcome));
    }
    let reports: Vec<Report> = reports.into_iter().flatten().collect();

    let failures = reports.iter().filter(|r| r.error.is_some()).count();

    let json = if engine.config().output.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write results to {:?}", path))?;
            info!("Results saved to: {:?}", path);
        }
        None => println!("{}", json),
    }

    if failures > 0 {
        anyhow::bail!("{} of {} recordings could not be scored", failures, reports.len());
    }

    info!("Scored {} recordings", reports.len());
    Ok(())
}

fn report(input: &Path, outcome: std::result::Result<PredictionResult, MotionError>) -> Report {
    match outcome {
        Ok(result) => Report {
            input: input.to_path_buf(),
            result: Some(result),
            error: None,
        },
        Err(e) => {
            error!("{:?}: {}", input, e);
            Report {
                input: input.to_path_buf(),
                result: None,
                error: Some(e.user_message()),
            }
        }
    }
}

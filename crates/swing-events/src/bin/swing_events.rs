//! Run every event detector over one pose clip and write a JSON report.
//!
//! Usage:
//!   swing-events --config analyze.json
//!   swing-events --frames poses.json --fps 30 --skeleton coco17 --output report.json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, LevelFilter};
use swing_events::{analyze_clip, AnalyzeConfig, AnalyzeIoError};

#[derive(Parser)]
#[command(
    name = "swing-events",
    version,
    about = "Detect serve, jump and swing events in a 2D pose clip"
)]
struct Cli {
    /// JSON config file; replaces the per-clip flags.
    #[arg(long, conflicts_with_all = ["frames", "fps", "skeleton", "primary_body"])]
    config: Option<PathBuf>,

    /// Pose store JSON (frame index to list of bodies).
    #[arg(long, required_unless_present = "config")]
    frames: Option<PathBuf>,

    /// Clip frame rate.
    #[arg(long, required_unless_present = "config")]
    fps: Option<f32>,

    /// Skeleton layout: coco17 or blazepose33.
    #[arg(long)]
    skeleton: Option<String>,

    /// Index of the tracked subject within each frame.
    #[arg(long)]
    primary_body: Option<usize>,

    /// Report path; overrides the config's output path.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log per-detector details to stderr.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<AnalyzeConfig, AnalyzeIoError> {
        let mut config = match &self.config {
            Some(path) => AnalyzeConfig::load_json(path)?,
            None => AnalyzeConfig {
                frames_path: self
                    .frames
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                fps: self.fps.unwrap_or_default(),
                skeleton: self
                    .skeleton
                    .clone()
                    .unwrap_or_else(|| swing_events::SkeletonModel::default().name().to_string()),
                primary_body: self.primary_body.unwrap_or_default(),
                output_path: None,
                params: Default::default(),
            },
        };
        if let Some(output) = self.output {
            config.output_path = Some(output.display().to_string());
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        swing_events::core::init_tracing(false);
        log::set_max_level(level);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = swing_events::core::init_with_level(level);
    }
}

fn run(cli: Cli) -> Result<(), AnalyzeIoError> {
    let config = cli.into_config()?;
    let clip = config.build_clip_info()?;
    let frames = config.load_frames()?;
    info!(
        "analyzing {} frames at {} fps ({})",
        frames.len(),
        clip.fps,
        clip.skeleton
    );

    let report = analyze_clip(&frames, &clip, &config.params);
    let output = config.output_path();
    report.write_json(&output)?;
    println!("{}", report.summary());
    println!("report written to {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

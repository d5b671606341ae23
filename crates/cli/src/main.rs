use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use gesturefx_core::display::domain::display_sink::{DisplaySink, NullDisplay};
use gesturefx_core::display::infrastructure::snapshot_display::SnapshotDisplay;
use gesturefx_core::filters::domain::filter_kind::FilterKind;
use gesturefx_core::filters::infrastructure::filter_bank::FilterBank;
use gesturefx_core::gesture::domain::landmark_detector::LandmarkDetector;
use gesturefx_core::gesture::infrastructure::replay_landmark_detector::ReplayLandmarkDetector;
use gesturefx_core::input::domain::key_command::CONTROLS_HELP;
use gesturefx_core::input::domain::key_source::KeySource;
use gesturefx_core::input::infrastructure::scripted_key_source::ScriptedKeySource;
use gesturefx_core::input::infrastructure::stdin_key_source::StdinKeySource;
use gesturefx_core::overlay::infrastructure::imageproc_renderer::ImageprocRenderer;
use gesturefx_core::pipeline::frame_processor::FrameProcessor;
use gesturefx_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use gesturefx_core::pipeline::run_session_use_case::RunSessionUseCase;
use gesturefx_core::pipeline::session_config::SessionConfig;
use gesturefx_core::pipeline::session_state::SessionState;
use gesturefx_core::recording::domain::recorder::{default_output_dir, Recorder, WriterFactory};
use gesturefx_core::shared::constants::{FILTER_COUNT, MAX_DISPLAY_HEIGHT, RECORDING_FPS};
use gesturefx_core::video::domain::video_reader::VideoReader;
use gesturefx_core::video::domain::video_writer::VideoWriter;
use gesturefx_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use gesturefx_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use gesturefx_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Gesture-controlled video filters: two hands frame a region, fingertips
/// pick the effect.
#[derive(Parser)]
#[command(name = "gesturefx")]
struct Cli {
    /// Input video file or any ffmpeg-openable URL.
    input: String,

    /// Per-frame hand landmarks (JSON). Without it no hands are detected.
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Directory for recordings (defaults to the user's video directory).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write the latest displayed frame to this image file.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Downscale displayed frames taller than this.
    #[arg(long, default_value_t = MAX_DISPLAY_HEIGHT)]
    max_display_height: u32,

    /// Recording frame rate.
    #[arg(long, default_value_t = RECORDING_FPS)]
    fps: f64,

    /// Seed for the random filters (particles, vintage, glitch).
    #[arg(long)]
    seed: Option<u64>,

    /// TrueType font for overlay text. Without it only shapes are drawn.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Do not flip frames horizontally.
    #[arg(long)]
    no_mirror: bool,

    /// Do not stack the hand tracking panel beneath the output.
    #[arg(long)]
    no_tracking_panel: bool,

    /// Start recording on the first frame.
    #[arg(long)]
    record: bool,

    /// Scripted key presses (JSON map of frame index to keys) instead of stdin.
    #[arg(long)]
    keys: Option<PathBuf>,

    /// Filter selected at start (1-8).
    #[arg(long, default_value = "1")]
    initial_filter: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = SessionConfig {
        mirror: !cli.no_mirror,
        tracking_panel: !cli.no_tracking_panel,
        max_display_height: cli.max_display_height,
        initial_filter: FilterKind::from_index(cli.initial_filter)
            .ok_or("Initial filter out of range")?,
        record_on_start: cli.record,
        ..SessionConfig::default()
    };

    let mut reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let metadata = reader.open(Path::new(&cli.input))?;

    let output_dir = cli.output_dir.clone().unwrap_or_else(default_output_dir);
    let factory: WriterFactory =
        Box::new(|| -> Box<dyn VideoWriter> { Box::new(FfmpegWriter::new()) });
    let recorder = Recorder::new(factory, &output_dir).with_fps(cli.fps);
    log::info!("Recordings will be saved to {}", output_dir.display());

    let filter = match cli.seed {
        Some(seed) => FilterBank::seeded(seed),
        None => FilterBank::new(),
    };
    let processor = FrameProcessor::new(
        build_detector(&cli)?,
        Box::new(filter),
        Box::new(build_renderer(&cli)?),
        config.clone(),
    );

    log::info!("Controls:");
    for line in CONTROLS_HELP {
        log::info!("  - {line}");
    }

    let mut use_case = RunSessionUseCase::new(
        reader,
        processor,
        SessionState::new(recorder, &config),
        build_display(cli.preview.as_deref(), &config),
        build_keys(&cli)?,
        Box::new(StdoutPipelineLogger::default()),
        None,
    );
    let stats = use_case.execute(&metadata)?;

    if let Some(recording) = stats.last_recording {
        log::info!(
            "Saved {} frames to {}",
            recording.frames,
            recording.path.display()
        );
    }
    log::info!(
        "Session ended after {} frames (filter: {})",
        stats.frames,
        stats.final_filter
    );
    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>> {
    match &cli.landmarks {
        Some(path) => {
            log::info!("Replaying landmarks from {}", path.display());
            Ok(Box::new(ReplayLandmarkDetector::from_path(path)?))
        }
        None => {
            log::warn!("No landmark source given; no hands will be detected");
            Ok(Box::new(ReplayLandmarkDetector::from_frames(HashMap::new())))
        }
    }
}

fn build_renderer(cli: &Cli) -> Result<ImageprocRenderer, Box<dyn std::error::Error>> {
    match &cli.font {
        Some(path) => ImageprocRenderer::from_font_file(path),
        None => {
            log::info!("No --font given; overlay text is disabled");
            Ok(ImageprocRenderer::new())
        }
    }
}

fn build_display(preview: Option<&Path>, config: &SessionConfig) -> Box<dyn DisplaySink> {
    match preview {
        Some(path) => Box::new(SnapshotDisplay::new(
            Box::new(ImageFileWriter::new()),
            path,
            config.max_display_height,
        )),
        None => Box::new(NullDisplay),
    }
}

fn build_keys(cli: &Cli) -> Result<Box<dyn KeySource>, Box<dyn std::error::Error>> {
    match &cli.keys {
        Some(path) => Ok(Box::new(ScriptedKeySource::from_path(path)?)),
        None => Ok(Box::new(StdinKeySource::spawn())),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !is_url(&cli.input) && !Path::new(&cli.input).exists() {
        return Err(format!("Input not found: {}", cli.input).into());
    }
    for (flag, path) in [
        ("--landmarks", &cli.landmarks),
        ("--font", &cli.font),
        ("--keys", &cli.keys),
    ] {
        if let Some(path) = path {
            if !path.exists() {
                return Err(format!("{flag} file not found: {}", path.display()).into());
            }
        }
    }
    if let Some(dir) = &cli.output_dir {
        if !dir.is_dir() {
            return Err(format!("Output directory not found: {}", dir.display()).into());
        }
    }
    if !(cli.fps > 0.0 && cli.fps.is_finite()) {
        return Err(format!("Fps must be positive, got {}", cli.fps).into());
    }
    if cli.max_display_height == 0 {
        return Err("Max display height must be positive".into());
    }
    if !(1..=FILTER_COUNT).contains(&cli.initial_filter) {
        return Err(format!(
            "Initial filter must be between 1 and {FILTER_COUNT}, got {}",
            cli.initial_filter
        )
        .into());
    }
    Ok(())
}

fn is_url(input: &str) -> bool {
    input.contains("://")
}

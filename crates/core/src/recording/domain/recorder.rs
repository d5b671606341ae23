use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::shared::constants::{RECORDING_EXTENSION, RECORDING_FPS, RECORDING_PREFIX};
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("failed to open recording {path}: {message}")]
    Open { path: PathBuf, message: String },
    #[error("frame is {actual:?}, recording expects {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("failed to write frame: {0}")]
    Write(String),
}

/// Builds a fresh sink for each recording.
pub type WriterFactory = Box<dyn FnMut() -> Box<dyn VideoWriter> + Send>;

/// What a finished recording produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordingSummary {
    pub path: PathBuf,
    pub frames: usize,
    pub duration: Duration,
}

struct ActiveRecording {
    writer: Box<dyn VideoWriter>,
    path: PathBuf,
    dimensions: (u32, u32),
    started: Instant,
    frames: usize,
}

enum RecordingState {
    Inactive,
    Active(ActiveRecording),
}

/// Toggleable file recorder: inactive until started, then every written
/// frame goes to a timestamped file until stopped.
pub struct Recorder {
    factory: WriterFactory,
    output_dir: PathBuf,
    fps: f64,
    state: RecordingState,
}

impl Recorder {
    pub fn new(factory: WriterFactory, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            factory,
            output_dir: output_dir.into(),
            fps: RECORDING_FPS,
            state: RecordingState::Inactive,
        }
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Active(_))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the file currently being written.
    pub fn current_path(&self) -> Option<&Path> {
        match &self.state {
            RecordingState::Active(active) => Some(&active.path),
            RecordingState::Inactive => None,
        }
    }

    /// Open a new sink sized to `dimensions`. Returns `Ok(None)` when a
    /// recording is already running; on failure the recorder stays inactive.
    pub fn start(&mut self, dimensions: (u32, u32)) -> Result<Option<PathBuf>, RecorderError> {
        if self.is_recording() {
            return Ok(None);
        }

        let stamp = chrono::Local::now().naive_local();
        let path = self.output_dir.join(recording_file_name(&stamp));
        let metadata = VideoMetadata::new(dimensions.0, dimensions.1, self.fps);

        let mut writer = (self.factory)();
        if let Err(e) = writer.open(&path, &metadata) {
            log::error!("Could not start recording {}: {e}", path.display());
            return Err(RecorderError::Open {
                path,
                message: e.to_string(),
            });
        }

        log::info!("Started recording: {}", path.display());
        self.state = RecordingState::Active(ActiveRecording {
            writer,
            path: path.clone(),
            dimensions,
            started: Instant::now(),
            frames: 0,
        });
        Ok(Some(path))
    }

    /// Finalize the current file. No-op when inactive.
    pub fn stop(&mut self) -> Option<RecordingSummary> {
        let RecordingState::Active(mut active) =
            std::mem::replace(&mut self.state, RecordingState::Inactive)
        else {
            return None;
        };

        if let Err(e) = active.writer.close() {
            log::warn!("Closing {} failed: {e}", active.path.display());
        }
        let duration = active.started.elapsed();
        log::info!(
            "Recording stopped. Duration: {:.1}s",
            duration.as_secs_f64()
        );
        Some(RecordingSummary {
            path: active.path,
            frames: active.frames,
            duration,
        })
    }

    /// Start when inactive, stop when active.
    pub fn toggle(&mut self, dimensions: (u32, u32)) -> Result<(), RecorderError> {
        if self.is_recording() {
            self.stop();
            Ok(())
        } else {
            self.start(dimensions).map(|_| ())
        }
    }

    /// Append `frame` to the open file. No-op when inactive.
    pub fn write(&mut self, frame: &Frame) -> Result<(), RecorderError> {
        let RecordingState::Active(active) = &mut self.state else {
            return Ok(());
        };
        if frame.dimensions() != active.dimensions {
            return Err(RecorderError::DimensionMismatch {
                expected: active.dimensions,
                actual: frame.dimensions(),
            });
        }
        active
            .writer
            .write(frame)
            .map_err(|e| RecorderError::Write(e.to_string()))?;
        active.frames += 1;
        Ok(())
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The user's video directory, or the working directory when the platform
/// has none.
pub fn default_output_dir() -> PathBuf {
    dirs::video_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `gesture_filter_recording_<YYYYmmdd_HHMMSS>.avi`
pub fn recording_file_name(at: &NaiveDateTime) -> String {
    format!(
        "{RECORDING_PREFIX}_{}.{RECORDING_EXTENSION}",
        at.format("%Y%m%d_%H%M%S")
    )
}

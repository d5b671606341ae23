use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::display::domain::display_sink::DisplaySink;
use crate::filters::domain::filter_kind::FilterKind;
use crate::input::domain::key_source::KeySource;
use crate::recording::domain::recorder::RecordingSummary;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

use super::frame_processor::FrameProcessor;
use super::infrastructure::threaded_frame_source::ThreadedFrameSource;
use super::pipeline_logger::PipelineLogger;
use super::session_state::SessionState;

/// How a session ended.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionStats {
    pub frames: usize,
    pub exit_requested: bool,
    pub final_filter: FilterKind,
    /// Recording still running at shutdown, finalized by the session.
    pub last_recording: Option<RecordingSummary>,
}

/// Drives the interactive frame loop.
///
/// Capture runs on a reader thread; everything else happens on the
/// calling thread, one frame at a time: process, display, then poll keys.
/// Single-use: `execute` consumes the reader.
pub struct RunSessionUseCase {
    reader: Option<Box<dyn VideoReader>>,
    processor: FrameProcessor,
    state: SessionState,
    display: Box<dyn DisplaySink>,
    keys: Box<dyn KeySource>,
    logger: Box<dyn PipelineLogger>,
    cancelled: Arc<AtomicBool>,
}

impl RunSessionUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        processor: FrameProcessor,
        state: SessionState,
        display: Box<dyn DisplaySink>,
        keys: Box<dyn KeySource>,
        logger: Box<dyn PipelineLogger>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            reader: Some(reader),
            processor,
            state,
            display,
            keys,
            logger,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Setting this flag ends the loop after the current frame.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn execute(
        &mut self,
        metadata: &VideoMetadata,
    ) -> Result<SessionStats, Box<dyn std::error::Error>> {
        let reader = self.reader.take().ok_or("Session already executed")?;
        let capacity = self.processor.config().channel_capacity;
        let source = ThreadedFrameSource::spawn(reader, capacity, self.cancelled.clone());

        self.logger.info(&format!(
            "Session started: {}x{} @ {:.1} fps",
            metadata.width, metadata.height, metadata.fps
        ));

        let mut frames = 0;
        while let Some(next) = source.next_frame() {
            if self.cancelled.load(Ordering::Relaxed) {
                break;
            }
            let frame = match next {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Frame source failed, ending session: {e}");
                    break;
                }
            };
            self.logger.metric("queued", source.queued() as f64);

            let index = frame.index();
            let processed =
                self.processor
                    .process(frame, &mut self.state, self.logger.as_mut());
            if let Err(e) = self.display.show(&processed.frame) {
                log::warn!("Display failed on frame {index}: {e}");
            }
            frames += 1;
            self.logger.progress(frames, metadata.total_frames);

            let dimensions = processed.frame.dimensions();
            for command in self.keys.poll(index) {
                self.state.apply_command(command, dimensions);
            }
            if self.state.exit_requested() {
                self.logger.info("Exit requested");
                break;
            }
        }

        self.cancelled.store(true, Ordering::Relaxed);
        let last_recording = self.state.shutdown();
        let joined = source.finish();
        self.logger.summary();
        joined?;

        Ok(SessionStats {
            frames,
            exit_requested: self.state.exit_requested(),
            final_filter: self.state.selected(),
            last_recording,
        })
    }
}

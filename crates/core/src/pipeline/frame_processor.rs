use std::time::Instant;

use crate::compositing::domain::masked_compositor::composite;
use crate::controls::domain::control_surface::ControlSurface;
use crate::filters::domain::filter_kind::FilterKind;
use crate::filters::domain::frame_filter::FrameFilter;
use crate::gesture::domain::gesture::Gesture;
use crate::gesture::domain::hand_landmarks::HandPointPair;
use crate::gesture::domain::landmark_detector::LandmarkDetector;
use crate::overlay::domain::overlay_model::OverlayState;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::region::domain::region_tracker::{self, RegionState};
use crate::shared::frame::Frame;
use crate::shared::point::PixelPoint;

use super::pipeline_logger::PipelineLogger;
use super::session_config::SessionConfig;
use super::session_state::SessionState;

/// What one frame produced, besides pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub index: usize,
    pub hand_count: usize,
    pub gestures: Vec<Gesture>,
    pub region: RegionState,
    pub selected: FilterKind,
    pub recorded: bool,
}

pub struct ProcessedFrame {
    /// Composite with overlays, plus the tracking panel when enabled.
    pub frame: Frame,
    pub report: FrameReport,
}

/// Runs one captured frame through detection, hover selection,
/// compositing, overlays and recording.
pub struct FrameProcessor {
    detector: Box<dyn LandmarkDetector>,
    filter: Box<dyn FrameFilter>,
    renderer: Box<dyn OverlayRenderer>,
    config: SessionConfig,
}

impl FrameProcessor {
    pub fn new(
        detector: Box<dyn LandmarkDetector>,
        filter: Box<dyn FrameFilter>,
        renderer: Box<dyn OverlayRenderer>,
        config: SessionConfig,
    ) -> Self {
        Self {
            detector,
            filter,
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn process(
        &mut self,
        mut frame: Frame,
        state: &mut SessionState,
        logger: &mut dyn PipelineLogger,
    ) -> ProcessedFrame {
        if self.config.mirror {
            frame.flip_horizontal();
        }
        let index = frame.index();
        let (width, height) = frame.dimensions();
        let fps = state.fps_meter().tick(Instant::now());

        let t0 = Instant::now();
        let hands = self.detector.detect(&frame).unwrap_or_else(|e| {
            log::warn!("Landmark detection failed on frame {index}: {e}");
            Vec::new()
        });
        logger.timing("detect", elapsed_ms(t0));
        logger.metric("hands", hands.len() as f64);

        let gestures: Vec<Gesture> = hands.iter().map(Gesture::classify).collect();
        let pairs: Vec<HandPointPair> = hands
            .iter()
            .map(|hand| hand.point_pair(width, height))
            .collect();
        let region = region_tracker::track(&pairs);

        let surface = ControlSurface::layout(width, height);
        let fingertips: Vec<PixelPoint> = pairs.iter().map(|p| p.index).collect();
        if let Some(kind) = surface.resolve_hover(&fingertips) {
            state.select(kind);
        }
        let selected = state.selected();

        let t0 = Instant::now();
        let mut output = composite(&frame, selected, region.roi.as_ref(), self.filter.as_ref());
        logger.timing("composite", elapsed_ms(t0));

        let t0 = Instant::now();
        let overlay = OverlayState {
            selected,
            apply_mode: region.apply_mode,
            hand_count: hands.len(),
            fps,
            gestures: &gestures,
            buttons: surface.buttons(),
            roi: region.roi.as_ref(),
        };
        self.renderer.draw_overlay(&mut output, &overlay);
        let mut combined = if self.config.tracking_panel {
            let mut panel = Frame::blank(width, height, index);
            self.renderer.draw_tracking(&mut panel, &pairs);
            match output.stack_vertical(&panel) {
                Some(stacked) => stacked,
                None => output,
            }
        } else {
            output
        };
        logger.timing("overlay", elapsed_ms(t0));

        let recorded = self.record(&mut combined, state, logger);

        ProcessedFrame {
            frame: combined,
            report: FrameReport {
                index,
                hand_count: hands.len(),
                gestures,
                region,
                selected,
                recorded,
            },
        }
    }

    fn record(
        &self,
        frame: &mut Frame,
        state: &mut SessionState,
        logger: &mut dyn PipelineLogger,
    ) -> bool {
        if state.take_start_pending() {
            // Open failures are reported by the recorder.
            let _ = state.recorder_mut().start(frame.dimensions());
        }
        if !state.recorder().is_recording() {
            return false;
        }

        self.renderer.draw_recording_indicator(frame);
        let t0 = Instant::now();
        let written = match state.recorder_mut().write(frame) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Recording frame {} failed: {e}", frame.index());
                false
            }
        };
        logger.timing("record", elapsed_ms(t0));
        written
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

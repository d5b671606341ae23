use crate::filters::domain::filter_kind::FilterKind;
use crate::input::domain::key_command::KeyCommand;
use crate::recording::domain::recorder::{Recorder, RecordingSummary};
use crate::shared::fps_meter::FpsMeter;

use super::session_config::SessionConfig;

/// Mutable state owned by the frame loop and threaded through every
/// frame: filter selection, frame-rate estimate and the recorder.
pub struct SessionState {
    selected: FilterKind,
    fps: FpsMeter,
    recorder: Recorder,
    start_pending: bool,
    exit_requested: bool,
}

impl SessionState {
    pub fn new(recorder: Recorder, config: &SessionConfig) -> Self {
        Self {
            selected: config.initial_filter,
            fps: FpsMeter::default(),
            recorder,
            start_pending: config.record_on_start,
            exit_requested: false,
        }
    }

    pub fn selected(&self) -> FilterKind {
        self.selected
    }

    pub fn select(&mut self, kind: FilterKind) {
        if kind != self.selected {
            log::debug!("Filter selected: {kind}");
        }
        self.selected = kind;
    }

    pub fn fps_meter(&mut self) -> &mut FpsMeter {
        &mut self.fps
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut Recorder {
        &mut self.recorder
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Consume a pending start-on-first-frame request.
    pub(crate) fn take_start_pending(&mut self) -> bool {
        std::mem::take(&mut self.start_pending)
    }

    /// Apply one operator command. `frame_dimensions` sizes a recording
    /// started by a toggle; it must match the frames later written.
    pub fn apply_command(&mut self, command: KeyCommand, frame_dimensions: (u32, u32)) {
        match command {
            KeyCommand::Exit => self.exit_requested = true,
            KeyCommand::SelectFilter(kind) => self.select(kind),
            KeyCommand::ToggleRecording => {
                // Open failures are reported by the recorder, which stays inactive.
                let _ = self.recorder.toggle(frame_dimensions);
            }
        }
    }

    /// Finalize any running recording.
    pub fn shutdown(&mut self) -> Option<RecordingSummary> {
        self.recorder.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::domain::recorder::WriterFactory;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::VideoMetadata;
    use crate::video::domain::video_writer::VideoWriter;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    struct CountingWriter {
        opens: Arc<Mutex<usize>>,
        fail_open: bool,
    }

    impl VideoWriter for CountingWriter {
        fn open(
            &mut self,
            _path: &Path,
            _metadata: &VideoMetadata,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_open {
                return Err("codec unavailable".into());
            }
            *self.opens.lock().unwrap() += 1;
            Ok(())
        }

        fn write(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    fn state_with(config: &SessionConfig, fail_open: bool) -> (SessionState, Arc<Mutex<usize>>) {
        let opens = Arc::new(Mutex::new(0));
        let shared = opens.clone();
        let factory: WriterFactory = Box::new(move || -> Box<dyn VideoWriter> {
            Box::new(CountingWriter {
                opens: shared.clone(),
                fail_open,
            })
        });
        let recorder = Recorder::new(factory, std::env::temp_dir());
        (SessionState::new(recorder, config), opens)
    }

    #[test]
    fn test_initial_selection_from_config() {
        let config = SessionConfig {
            initial_filter: FilterKind::Neon,
            ..SessionConfig::default()
        };
        let (state, _) = state_with(&config, false);
        assert_eq!(state.selected(), FilterKind::Neon);
        assert!(!state.exit_requested());
        assert!(!state.recorder().is_recording());
    }

    #[test]
    fn test_select_filter_command() {
        let (mut state, _) = state_with(&SessionConfig::default(), false);
        state.apply_command(KeyCommand::SelectFilter(FilterKind::Sepia), (64, 48));
        assert_eq!(state.selected(), FilterKind::Sepia);
    }

    #[test]
    fn test_exit_command() {
        let (mut state, _) = state_with(&SessionConfig::default(), false);
        state.apply_command(KeyCommand::Exit, (64, 48));
        assert!(state.exit_requested());
    }

    #[test]
    fn test_toggle_recording_twice() {
        let (mut state, opens) = state_with(&SessionConfig::default(), false);
        state.apply_command(KeyCommand::ToggleRecording, (64, 96));
        assert!(state.recorder().is_recording());
        state.apply_command(KeyCommand::ToggleRecording, (64, 96));
        assert!(!state.recorder().is_recording());
        assert_eq!(*opens.lock().unwrap(), 1);
    }

    #[test]
    fn test_toggle_open_failure_is_not_fatal() {
        let (mut state, _) = state_with(&SessionConfig::default(), true);
        state.apply_command(KeyCommand::ToggleRecording, (64, 96));
        assert!(!state.recorder().is_recording());
        assert!(!state.exit_requested());
    }

    #[test]
    fn test_start_pending_is_taken_once() {
        let config = SessionConfig {
            record_on_start: true,
            ..SessionConfig::default()
        };
        let (mut state, _) = state_with(&config, false);
        assert!(state.take_start_pending());
        assert!(!state.take_start_pending());
    }

    #[test]
    fn test_shutdown_stops_recording() {
        let (mut state, _) = state_with(&SessionConfig::default(), false);
        state.apply_command(KeyCommand::ToggleRecording, (32, 32));
        let summary = state.shutdown().unwrap();
        assert_eq!(summary.frames, 0);
        assert!(!state.recorder().is_recording());
        assert!(state.shutdown().is_none());
    }
}

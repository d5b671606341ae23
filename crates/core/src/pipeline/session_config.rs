use crate::filters::domain::filter_kind::FilterKind;
use crate::shared::constants::MAX_DISPLAY_HEIGHT;

const DEFAULT_CHANNEL_CAPACITY: usize = 4;

/// Validated settings for one interactive session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Flip every captured frame horizontally before detection.
    pub mirror: bool,
    /// Stack the hand-tracking panel beneath the composite.
    pub tracking_panel: bool,
    pub max_display_height: u32,
    pub initial_filter: FilterKind,
    /// Begin recording on the first processed frame.
    pub record_on_start: bool,
    /// Frames buffered between the reader thread and the frame loop.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mirror: true,
            tracking_panel: true,
            max_display_height: MAX_DISPLAY_HEIGHT,
            initial_filter: FilterKind::default(),
            record_on_start: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

use crate::gesture::domain::hand_landmarks::HandPointPair;
use crate::shared::frame::Frame;

use super::overlay_model::OverlayState;

/// Draws the on-screen UI. Implementations only paint pixels; they never
/// feed back into filter selection or recording.
pub trait OverlayRenderer: Send {
    /// Header, status, button row, gesture panel and region outline.
    fn draw_overlay(&self, frame: &mut Frame, state: &OverlayState<'_>);

    /// Per-hand fingertip markers on the (black) tracking panel.
    fn draw_tracking(&self, panel: &mut Frame, hands: &[HandPointPair]);

    /// Red dot and `REC` label in the top-right corner.
    fn draw_recording_indicator(&self, frame: &mut Frame);
}

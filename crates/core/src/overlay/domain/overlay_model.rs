use crate::controls::domain::control_surface::Button;
use crate::filters::domain::filter_kind::FilterKind;
use crate::gesture::domain::gesture::Gesture;
use crate::gesture::domain::hand_landmarks::HandPointPair;
use crate::region::domain::region_tracker::Roi;

/// Everything the overlay shows for one frame. Borrowed, read-only.
#[derive(Clone, Copy, Debug)]
pub struct OverlayState<'a> {
    pub selected: FilterKind,
    pub apply_mode: bool,
    pub hand_count: usize,
    pub fps: f64,
    pub gestures: &'a [Gesture],
    pub buttons: &'a [Button],
    pub roi: Option<&'a Roi>,
}

impl OverlayState<'_> {
    /// `FPS: 29.8 | Hands: 2 | Mode: Active`
    pub fn status_line(&self) -> String {
        let mode = if self.apply_mode { "Active" } else { "Standby" };
        format!(
            "FPS: {:.1} | Hands: {} | Mode: {}",
            self.fps, self.hand_count, mode
        )
    }

    /// One `Hand i: <gesture>` line per detected hand, 1-based.
    pub fn gesture_lines(&self) -> Vec<String> {
        self.gestures
            .iter()
            .enumerate()
            .map(|(i, g)| format!("Hand {}: {}", i + 1, g))
            .collect()
    }
}

/// Label pair drawn beside each hand on the tracking panel.
pub fn hand_labels(slot: usize, hand: &HandPointPair) -> (String, String) {
    let distance = hand.thumb.distance(&hand.index) as i64;
    (format!("Hand {}", slot + 1), format!("Dist: {distance}px"))
}

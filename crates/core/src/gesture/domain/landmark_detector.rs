use crate::shared::frame::Frame;

use super::hand_landmarks::HandLandmarks;

/// Domain interface for hand landmark detection.
///
/// Returns hands in the detector's own enumeration order; an empty result is
/// not an error. Implementations may be stateful, hence `&mut self`.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, Box<dyn std::error::Error>>;
}

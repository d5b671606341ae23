//! Single-frame hand pose classification from landmark geometry.

use std::fmt;

use crate::shared::constants::{FINGER_JOINTS, FINGER_TIPS};

use super::hand_landmarks::HandLandmarks;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Point,
    Pinch,
    Peace,
    OpenPalm,
    Fist,
    Other,
}

/// Extension flags in [thumb, index, middle, ring, pinky] order.
pub type FingerPattern = [bool; 5];

impl Gesture {
    /// Classify a hand by which fingers are extended.
    ///
    /// Thumb: extended when its tip lies right of the IP joint.
    /// Other fingers: extended when the tip lies above the PIP joint
    /// (smaller y in image coordinates). No state is kept between calls.
    pub fn classify(hand: &HandLandmarks) -> Gesture {
        Self::from_pattern(finger_pattern(hand))
    }

    pub fn from_pattern(pattern: FingerPattern) -> Gesture {
        match pattern {
            [false, true, false, false, false] => Gesture::Point,
            [true, true, false, false, false] => Gesture::Pinch,
            [false, true, true, false, false] => Gesture::Peace,
            [true, true, true, true, true] => Gesture::OpenPalm,
            [false, false, false, false, false] => Gesture::Fist,
            _ => Gesture::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Point => "point",
            Gesture::Pinch => "pinch",
            Gesture::Peace => "peace",
            Gesture::OpenPalm => "open_palm",
            Gesture::Fist => "fist",
            Gesture::Other => "other",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn finger_pattern(hand: &HandLandmarks) -> FingerPattern {
    let mut pattern = [false; 5];
    let thumb_tip = hand.get(FINGER_TIPS[0]);
    let thumb_joint = hand.get(FINGER_JOINTS[0]);
    pattern[0] = thumb_tip.x > thumb_joint.x;
    for finger in 1..5 {
        let tip = hand.get(FINGER_TIPS[finger]);
        let joint = hand.get(FINGER_JOINTS[finger]);
        pattern[finger] = tip.y < joint.y;
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::domain::hand_landmarks::Landmark;
    use crate::shared::constants::LANDMARK_COUNT;
    use rstest::rstest;

    /// Builds a hand whose extension pattern is exactly `pattern`.
    fn hand(pattern: FingerPattern) -> HandLandmarks {
        let mut pts = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        let (tx, jx) = if pattern[0] { (0.6, 0.5) } else { (0.4, 0.5) };
        pts[FINGER_TIPS[0]] = Landmark::new(tx, 0.5);
        pts[FINGER_JOINTS[0]] = Landmark::new(jx, 0.5);
        for finger in 1..5 {
            let tip_y = if pattern[finger] { 0.3 } else { 0.7 };
            pts[FINGER_TIPS[finger]] = Landmark::new(0.5, tip_y);
            pts[FINGER_JOINTS[finger]] = Landmark::new(0.5, 0.5);
        }
        HandLandmarks::new(pts)
    }

    #[rstest]
    #[case::point([false, true, false, false, false], Gesture::Point)]
    #[case::pinch([true, true, false, false, false], Gesture::Pinch)]
    #[case::peace([false, true, true, false, false], Gesture::Peace)]
    #[case::open_palm([true; 5], Gesture::OpenPalm)]
    #[case::fist([false; 5], Gesture::Fist)]
    #[case::thumb_only([true, false, false, false, false], Gesture::Other)]
    #[case::three_fingers([false, true, true, true, false], Gesture::Other)]
    #[case::pinky_only([false, false, false, false, true], Gesture::Other)]
    fn test_classify(#[case] pattern: FingerPattern, #[case] expected: Gesture) {
        let h = hand(pattern);
        assert_eq!(finger_pattern(&h), pattern);
        assert_eq!(Gesture::classify(&h), expected);
    }

    #[test]
    fn test_every_pattern_yields_one_label() {
        for bits in 0u8..32 {
            let pattern: FingerPattern = std::array::from_fn(|i| bits & (1 << i) != 0);
            let g = Gesture::from_pattern(pattern);
            let known = [
                Gesture::Point,
                Gesture::Pinch,
                Gesture::Peace,
                Gesture::OpenPalm,
                Gesture::Fist,
                Gesture::Other,
            ];
            assert!(known.contains(&g));
        }
    }

    #[test]
    fn test_equal_coordinates_count_as_folded() {
        let h = HandLandmarks::new([Landmark::new(0.5, 0.5); LANDMARK_COUNT]);
        assert_eq!(Gesture::classify(&h), Gesture::Fist);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Gesture::OpenPalm.to_string(), "open_palm");
        assert_eq!(format!("Hand 1: {}", Gesture::Point), "Hand 1: point");
    }
}

use crate::gesture::domain::hand_landmarks::HandPointPair;
use crate::shared::point::PixelPoint;

/// Quadrilateral spanned by two hands:
/// `[hand1.thumb, hand1.index, hand2.index, hand2.thumb]`.
///
/// May be self-intersecting; consumers must not assume convexity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roi {
    points: [PixelPoint; 4],
}

impl Roi {
    pub fn from_hands(hand1: &HandPointPair, hand2: &HandPointPair) -> Self {
        Self {
            points: [hand1.thumb, hand1.index, hand2.index, hand2.thumb],
        }
    }

    pub fn points(&self) -> &[PixelPoint; 4] {
        &self.points
    }
}

/// Region state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionState {
    pub roi: Option<Roi>,
    pub apply_mode: bool,
}

/// Builds the region of interest from the first two reported hands.
///
/// Hands are taken in detector order with no re-identification across
/// frames, so the polygon can flip when the detector swaps hand order.
/// Nothing is carried over between frames.
pub fn track(hands: &[HandPointPair]) -> RegionState {
    match hands {
        [hand1, hand2, ..] => RegionState {
            roi: Some(Roi::from_hands(hand1, hand2)),
            apply_mode: true,
        },
        _ => RegionState::default(),
    }
}

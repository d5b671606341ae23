//! 21-point hand landmark sets in normalized image coordinates.

use thiserror::Error;

use crate::shared::constants::{INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
use crate::shared::point::PixelPoint;

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks per hand, got {0}")]
    WrongCount(usize),
    #[error("landmark {index} at ({x}, {y}) is outside the accepted range")]
    OutOfRange { index: usize, x: f32, y: f32 },
}

/// Normalized coordinates accepted per axis. Detectors report points a
/// little past the frame edge; anything further is treated as garbage.
pub const COORDINATE_RANGE: (f32, f32) = (-1.0, 2.0);

/// Normalized landmark coordinate, nominally in [0, 1] x [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn in_range(&self) -> bool {
        let (lo, hi) = COORDINATE_RANGE;
        (lo..=hi).contains(&self.x) && (lo..=hi).contains(&self.y)
    }

    /// Truncating projection into pixel space. Coordinates are clamped to
    /// `COORDINATE_RANGE` first; NaN maps to 0.
    pub fn to_pixel(&self, width: u32, height: u32) -> PixelPoint {
        let (lo, hi) = COORDINATE_RANGE;
        PixelPoint::new(
            (self.x.clamp(lo, hi) * width as f32) as i32,
            (self.y.clamp(lo, hi) * height as f32) as i32,
        )
    }
}

/// One detected hand, landmarks ordered by the standard anatomical numbering
/// (0 = wrist, 4 = thumb tip, 8 = index tip, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

/// Thumb and index fingertips of one hand in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandPointPair {
    pub thumb: PixelPoint,
    pub index: PixelPoint,
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.in_range()) {
            return Err(LandmarkError::OutOfRange {
                index,
                x: p.x,
                y: p.y,
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn point_pair(&self, width: u32, height: u32) -> HandPointPair {
        HandPointPair {
            thumb: self.points[THUMB_TIP].to_pixel(width, height),
            index: self.points[INDEX_TIP].to_pixel(width, height),
        }
    }
}

use crate::shared::frame::Frame;

use super::filter_kind::FilterKind;

/// Domain interface for full-frame visual filters.
///
/// Implementations return a new frame of identical dimensions and never
/// modify the input.
pub trait FrameFilter: Send {
    fn apply(&self, kind: FilterKind, frame: &Frame) -> Frame;
}

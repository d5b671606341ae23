use crate::filters::domain::filter_kind::FilterKind;
use crate::filters::domain::frame_filter::FrameFilter;
use crate::region::domain::polygon_mask::Mask;
use crate::region::domain::region_tracker::Roi;
use crate::shared::frame::{Frame, CHANNELS};

/// Applies `kind` inside `roi` and leaves every other pixel as captured.
///
/// The filter always runs over the whole frame before masking so spatial
/// effects see their full neighbourhood at the region boundary. Without a
/// region the input is returned unchanged and the filter is not invoked.
pub fn composite(
    frame: &Frame,
    kind: FilterKind,
    roi: Option<&Roi>,
    filter: &dyn FrameFilter,
) -> Frame {
    let Some(roi) = roi else {
        return frame.clone();
    };

    let mask = Mask::from_polygon(roi.points(), frame.width(), frame.height());
    if mask.count() == 0 {
        return frame.clone();
    }

    let filtered = filter.apply(kind, frame);
    merge(frame, &filtered, &mask)
}

/// Copy `filtered` pixels into a clone of `original` wherever `mask` is set.
pub fn merge(original: &Frame, filtered: &Frame, mask: &Mask) -> Frame {
    debug_assert_eq!(original.dimensions(), filtered.dimensions());
    debug_assert_eq!(original.dimensions(), (mask.width(), mask.height()));

    let mut out = original.clone();
    let src = filtered.data();
    let dst = out.data_mut();
    for (i, &set) in mask.bits().iter().enumerate() {
        if !set {
            continue;
        }
        let at = i * CHANNELS;
        dst[at..at + CHANNELS].copy_from_slice(&src[at..at + CHANNELS]);
    }
    out
}

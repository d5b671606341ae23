use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Pulls captured frames in order from a camera, file or stream.
///
/// The session ends when the iterator is exhausted or yields an error.
pub trait VideoReader: Send {
    fn open(&mut self, source: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Frames in capture order, indexed from zero.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    fn close(&mut self);
}

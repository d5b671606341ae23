use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// File-backed video sink used by the recorder.
///
/// `open` fixes the frame size and rate; every written frame must match it.
pub trait VideoWriter: Send {
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush pending packets and finalize the container.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

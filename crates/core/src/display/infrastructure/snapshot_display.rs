use std::path::PathBuf;

use crate::display::domain::display_sink::{display_size, DisplaySink};
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Preview sink that keeps the most recent frame in an image file,
/// downscaled to the display height limit.
pub struct SnapshotDisplay {
    writer: Box<dyn ImageWriter>,
    path: PathBuf,
    max_height: u32,
    shown: usize,
}

impl SnapshotDisplay {
    pub fn new(writer: Box<dyn ImageWriter>, path: impl Into<PathBuf>, max_height: u32) -> Self {
        Self {
            writer,
            path: path.into(),
            max_height,
            shown: 0,
        }
    }

    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl DisplaySink for SnapshotDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let size = display_size(frame.width(), frame.height(), self.max_height);
        let resize = (size != frame.dimensions()).then_some(size);
        self.writer.write(&self.path, frame, resize)?;
        self.shown += 1;
        Ok(())
    }
}

use crate::shared::frame::Frame;

/// Live preview surface, updated once per processed frame.
pub trait DisplaySink: Send {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}

/// Discards every frame.
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// Size a frame is shown at: unchanged up to `max_height`, otherwise
/// scaled down to that height with the aspect ratio kept.
pub fn display_size(width: u32, height: u32, max_height: u32) -> (u32, u32) {
    if height <= max_height || height == 0 {
        return (width, height);
    }
    let scale = max_height as f64 / height as f64;
    let scaled_width = ((width as f64 * scale) as u32).max(1);
    (scaled_width, max_height)
}

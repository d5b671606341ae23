use image::RgbImage;
use ndarray::{ArrayView3, ArrayViewMut3};

/// A single video frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; filters, compositing
/// and overlays all work on this 3-channel layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

pub const CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// All-black frame of the given size.
    pub fn blank(width: u32, height: u32, index: usize) -> Self {
        Self::new(
            vec![0; width as usize * height as usize * CHANNELS],
            width,
            height,
            index,
        )
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgb);
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Mirror the frame around its vertical axis (selfie view).
    pub fn flip_horizontal(&mut self) {
        let row_len = self.width as usize * CHANNELS;
        if row_len == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(row_len) {
            let w = row.len() / CHANNELS;
            for x in 0..w / 2 {
                let (a, b) = (x * CHANNELS, (w - 1 - x) * CHANNELS);
                for c in 0..CHANNELS {
                    row.swap(a + c, b + c);
                }
            }
        }
    }

    /// Stack `self` on top of `below`. Widths must match.
    pub fn stack_vertical(&self, below: &Frame) -> Option<Frame> {
        if self.width != below.width {
            return None;
        }
        let mut data = Vec::with_capacity(self.data.len() + below.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&below.data);
        Some(Frame::new(
            data,
            self.width,
            self.height + below.height,
            self.index,
        ))
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Frame data length must match dimensions")
    }

    pub fn from_rgb_image(image: RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.dimensions(), (2, 2));
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 0);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut frame = Frame::blank(4, 3, 0);
        frame.set_pixel(3, 2, [1, 2, 3]);
        assert_eq!(frame.pixel(3, 2), [1, 2, 3]);
        assert_eq!(frame.as_ndarray()[[2, 3, 2]], 3);
    }

    #[test]
    fn test_flip_horizontal_mirrors_rows() {
        let mut frame = Frame::blank(3, 1, 0);
        frame.set_pixel(0, 0, [10, 20, 30]);
        frame.set_pixel(2, 0, [40, 50, 60]);
        frame.flip_horizontal();
        assert_eq!(frame.pixel(0, 0), [40, 50, 60]);
        assert_eq!(frame.pixel(1, 0), [0, 0, 0]);
        assert_eq!(frame.pixel(2, 0), [10, 20, 30]);
    }

    #[test]
    fn test_stack_vertical() {
        let top = Frame::new(vec![1u8; 6], 2, 1, 7);
        let bottom = Frame::new(vec![2u8; 12], 2, 2, 0);
        let stacked = top.stack_vertical(&bottom).unwrap();
        assert_eq!(stacked.dimensions(), (2, 3));
        assert_eq!(stacked.index(), 7);
        assert_eq!(stacked.pixel(0, 0), [1, 1, 1]);
        assert_eq!(stacked.pixel(1, 2), [2, 2, 2]);
    }

    #[test]
    fn test_stack_vertical_rejects_width_mismatch() {
        let top = Frame::blank(2, 1, 0);
        let bottom = Frame::blank(3, 1, 0);
        assert!(top.stack_vertical(&bottom).is_none());
    }

    #[test]
    fn test_rgb_image_conversion() {
        let mut frame = Frame::blank(2, 2, 4);
        frame.set_pixel(1, 1, [9, 8, 7]);
        let img = frame.to_rgb_image();
        assert_eq!(img.get_pixel(1, 1).0, [9, 8, 7]);
        let back = Frame::from_rgb_image(img, 4);
        assert_eq!(back, frame);
    }
}

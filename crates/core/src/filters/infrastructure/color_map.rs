//! Gray-to-color palettes applied through 256-entry lookup tables.

use image::GrayImage;

use crate::shared::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMap {
    /// Black -> red -> yellow -> white.
    Hot,
    /// Deep blue -> magenta -> orange -> yellow.
    Plasma,
    /// Cyan -> magenta.
    Cool,
}

const PLASMA_STOPS: [(f32, [f32; 3]); 5] = [
    (0.0, [13.0, 8.0, 135.0]),
    (0.25, [126.0, 3.0, 168.0]),
    (0.5, [204.0, 71.0, 120.0]),
    (0.75, [248.0, 149.0, 64.0]),
    (1.0, [240.0, 249.0, 33.0]),
];

impl ColorMap {
    pub fn lut(&self) -> [[u8; 3]; 256] {
        let mut lut = [[0u8; 3]; 256];
        for (v, entry) in lut.iter_mut().enumerate() {
            *entry = self.color(v as f32 / 255.0);
        }
        lut
    }

    fn color(&self, t: f32) -> [u8; 3] {
        let unit = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self {
            ColorMap::Hot => [
                unit(t * 8.0 / 3.0),
                unit((t - 3.0 / 8.0) * 8.0 / 3.0),
                unit((t - 0.75) * 4.0),
            ],
            ColorMap::Cool => [unit(t), unit(1.0 - t), 255],
            ColorMap::Plasma => {
                let i = PLASMA_STOPS
                    .windows(2)
                    .position(|pair| t <= pair[1].0)
                    .unwrap_or(PLASMA_STOPS.len() - 2);
                let (t0, c0) = PLASMA_STOPS[i];
                let (t1, c1) = PLASMA_STOPS[i + 1];
                let f = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
                std::array::from_fn(|c| (c0[c] + (c1[c] - c0[c]) * f).round() as u8)
            }
        }
    }

    /// Render a gray plane through this palette.
    pub fn apply(&self, gray: &GrayImage, index: usize) -> Frame {
        let lut = self.lut();
        let mut data = Vec::with_capacity(gray.as_raw().len() * 3);
        for &v in gray.as_raw() {
            data.extend_from_slice(&lut[v as usize]);
        }
        Frame::new(data, gray.width(), gray.height(), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use rstest::rstest;

    #[rstest]
    #[case::hot(ColorMap::Hot, [0, 0, 0], [255, 255, 255])]
    #[case::cool(ColorMap::Cool, [0, 255, 255], [255, 0, 255])]
    #[case::plasma(ColorMap::Plasma, [13, 8, 135], [240, 249, 33])]
    fn test_endpoints(#[case] map: ColorMap, #[case] low: [u8; 3], #[case] high: [u8; 3]) {
        let lut = map.lut();
        assert_eq!(lut[0], low);
        assert_eq!(lut[255], high);
    }

    #[test]
    fn test_hot_passes_through_red_then_yellow() {
        let lut = ColorMap::Hot.lut();
        // t = 96/255 ~ 0.376: red saturated, green just starting
        assert_eq!(lut[96][0], 255);
        assert!(lut[96][1] < 5);
        assert_eq!(lut[96][2], 0);
        // t = 191/255 ~ 0.749: near yellow, blue not yet rising
        assert_eq!(lut[191][0], 255);
        assert!(lut[191][1] >= 250);
        assert_eq!(lut[191][2], 0);
    }

    #[test]
    fn test_hot_channels_monotonic() {
        let lut = ColorMap::Hot.lut();
        for v in 1..256 {
            for c in 0..3 {
                assert!(lut[v][c] >= lut[v - 1][c]);
            }
        }
    }

    #[test]
    fn test_apply_maps_each_pixel() {
        let gray = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 255 }]));
        let frame = ColorMap::Cool.apply(&gray, 9);
        assert_eq!(frame.dimensions(), (2, 1));
        assert_eq!(frame.index(), 9);
        assert_eq!(frame.pixel(0, 0), [0, 255, 255]);
        assert_eq!(frame.pixel(1, 0), [255, 0, 255]);
    }
}

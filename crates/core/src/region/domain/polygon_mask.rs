//! Binary masks rasterised from polygons with the even-odd rule.
//!
//! A pixel is inside when a horizontal ray through its centre crosses the
//! polygon boundary an odd number of times. For a self-intersecting
//! quadrilateral (a "bow-tie") both lobes are filled and the crossing point
//! itself is not special-cased.

use crate::shared::point::PixelPoint;

/// Per-pixel inside/outside flags, row-major, same size as the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    bits: Vec<bool>,
    width: u32,
    height: u32,
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            bits: vec![false; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Fill `polygon` into a fresh mask of the given size.
    ///
    /// Polygons with fewer than three vertices produce an empty mask.
    pub fn from_polygon(polygon: &[PixelPoint], width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        if polygon.len() < 3 {
            return mask;
        }

        let mut crossings: Vec<f64> = Vec::with_capacity(polygon.len());
        for y in 0..height {
            let sy = y as f64 + 0.5;
            crossings.clear();
            for (i, a) in polygon.iter().enumerate() {
                let b = &polygon[(i + 1) % polygon.len()];
                let (ay, by) = (a.y as f64, b.y as f64);
                // Half-open rule: each edge owns its lower endpoint only.
                if (ay <= sy) != (by <= sy) {
                    let t = (sy - ay) / (by - ay);
                    crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
                }
            }
            crossings.sort_by(f64::total_cmp);

            let row = y as usize * width as usize;
            for span in crossings.chunks_exact(2) {
                // Pixel x is inside when its centre lies in [span[0], span[1]).
                let start = (span[0] - 0.5).ceil().max(0.0);
                let end = ((span[1] - 0.5).ceil() - 1.0).min(width as f64 - 1.0);
                if end < start {
                    continue;
                }
                for x in start as usize..=end as usize {
                    mask.bits[row + x] = true;
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Row-major flags, one per pixel.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

//! Single-channel helpers on `GrayImage` planes.

use image::{GrayImage, Luma};

use crate::shared::frame::Frame;

const BINS: usize = 256;

pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

pub fn to_gray(frame: &Frame) -> GrayImage {
    image::imageops::grayscale(&frame.to_rgb_image())
}

/// Binary edge map (0 or 255).
pub fn edges(gray: &GrayImage) -> GrayImage {
    imageproc::edges::canny(gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD)
}

/// Replicate a gray plane into all three channels.
pub fn gray_to_frame(gray: &GrayImage, index: usize) -> Frame {
    let mut data = Vec::with_capacity(gray.as_raw().len() * 3);
    for &v in gray.as_raw() {
        data.extend_from_slice(&[v, v, v]);
    }
    Frame::new(data, gray.width(), gray.height(), index)
}

/// `round(a * wa + b * wb)`, saturated to u8.
pub fn blend_gray(a: &GrayImage, wa: f32, b: &GrayImage, wb: f32) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        let (p, q) = (a.get_pixel(x, y)[0], b.get_pixel(x, y)[0]);
        Luma([saturate(p as f32 * wa + q as f32 * wb)])
    })
}

pub fn saturate(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Contrast-limited adaptive histogram equalization.
///
/// The plane is split into `grid x grid` tiles; each tile's histogram is
/// clipped at `clip_limit * tile_area / 256` with the excess spread evenly,
/// and per-pixel results are bilinearly interpolated between the four
/// nearest tile centres.
pub fn clahe(gray: &GrayImage, clip_limit: f32, grid: usize) -> GrayImage {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    if h == 0 || w == 0 || grid == 0 {
        return gray.clone();
    }

    let tile_w = w.div_ceil(grid).max(1);
    let tile_h = h.div_ceil(grid).max(1);
    let tiles_x = w.div_ceil(tile_w);
    let tiles_y = h.div_ceil(tile_h);

    let mut luts = vec![[0u8; BINS]; tiles_x * tiles_y];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let y0 = ty * tile_h;
            let x0 = tx * tile_w;
            let y1 = (y0 + tile_h).min(h);
            let x1 = (x0 + tile_w).min(w);
            luts[ty * tiles_x + tx] = tile_lut(gray, (y0, y1), (x0, x1), clip_limit);
        }
    }

    let axis = |pos: usize, tile: usize, count: usize| -> (usize, usize, f32) {
        let g = (pos as f32 + 0.5) / tile as f32 - 0.5;
        let lo = g.floor();
        let weight = g - lo;
        let lo = lo as isize;
        let clamp = |i: isize| i.clamp(0, count as isize - 1) as usize;
        (clamp(lo), clamp(lo + 1), weight)
    };

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let (ty1, ty2, wy) = axis(y as usize, tile_h, tiles_y);
        let (tx1, tx2, wx) = axis(x as usize, tile_w, tiles_x);
        let v = gray.get_pixel(x, y)[0] as usize;
        let top = luts[ty1 * tiles_x + tx1][v] as f32 * (1.0 - wx)
            + luts[ty1 * tiles_x + tx2][v] as f32 * wx;
        let bottom = luts[ty2 * tiles_x + tx1][v] as f32 * (1.0 - wx)
            + luts[ty2 * tiles_x + tx2][v] as f32 * wx;
        Luma([saturate(top * (1.0 - wy) + bottom * wy)])
    })
}

fn tile_lut(
    gray: &GrayImage,
    (y0, y1): (usize, usize),
    (x0, x1): (usize, usize),
    clip_limit: f32,
) -> [u8; BINS] {
    let mut hist = [0usize; BINS];
    for y in y0..y1 {
        for x in x0..x1 {
            hist[gray.get_pixel(x as u32, y as u32)[0] as usize] += 1;
        }
    }
    let area = (y1 - y0) * (x1 - x0);
    let mut lut = [0u8; BINS];
    if area == 0 {
        for (v, out) in lut.iter_mut().enumerate() {
            *out = v as u8;
        }
        return lut;
    }

    let clip = ((clip_limit * area as f32 / BINS as f32) as usize).max(1);
    let mut excess = 0usize;
    for count in hist.iter_mut() {
        if *count > clip {
            excess += *count - clip;
            *count = clip;
        }
    }
    let per_bin = excess / BINS;
    let mut residual = excess % BINS;
    for count in hist.iter_mut() {
        *count += per_bin;
    }
    if residual > 0 {
        let step = (BINS / residual).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }

    let scale = 255.0 / area as f32;
    let mut sum = 0usize;
    for (v, out) in lut.iter_mut().enumerate() {
        sum += hist[v];
        *out = saturate(sum as f32 * scale);
    }
    lut
}

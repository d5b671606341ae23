//! The eight full-frame effects behind the filter buttons.
//!
//! Every effect returns a new frame of the input's dimensions with values
//! saturated to 0..=255. Effects that draw on randomness take it from the
//! supplied generator so callers can pin a seed.

use std::f32::consts::PI;

use image::Rgb;
use imageproc::contrast::equalize_histogram;
use imageproc::drawing::draw_filled_circle_mut;
use ndarray::Zip;
use rand::rngs::StdRng;
use rand::Rng;

use crate::shared::frame::Frame;

use super::color_map::ColorMap;
use super::grayscale::{blend_gray, clahe, edges, gray_to_frame, saturate, to_gray};

pub type FilterFn = fn(&Frame, &mut StdRng) -> Frame;

const CLAHE_CLIP_LIMIT: f32 = 4.0;
const CLAHE_GRID: usize = 8;

pub const PARTICLE_COUNT: usize = 200;
const PARTICLE_HUE_STEP: usize = 20;

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.543, 0.131],
];

const VINTAGE_NOISE_SIGMA: f32 = 25.0;
/// Per-channel gain applied after the grain: warm reds, dimmed blues.
const VINTAGE_GAIN: [f32; 3] = [1.2, 1.1, 0.8];

pub const GLITCH_MAX_SHIFT: i32 = 5;

pub fn thermal(frame: &Frame, _rng: &mut StdRng) -> Frame {
    ColorMap::Hot.apply(&to_gray(frame), frame.index())
}

pub fn edge_enhanced(frame: &Frame, _rng: &mut StdRng) -> Frame {
    let gray = to_gray(frame);
    let equalized = equalize_histogram(&gray);
    gray_to_frame(&blend_gray(&equalized, 0.7, &edges(&gray), 0.3), frame.index())
}

pub fn high_contrast(frame: &Frame, _rng: &mut StdRng) -> Frame {
    let gray = to_gray(frame);
    gray_to_frame(&clahe(&gray, CLAHE_CLIP_LIMIT, CLAHE_GRID), frame.index())
}

pub fn particles(frame: &Frame, rng: &mut StdRng) -> Frame {
    let (w, h) = frame.dimensions();
    if w == 0 || h == 0 {
        return frame.clone();
    }
    let mut img = frame.to_rgb_image();
    for i in 0..PARTICLE_COUNT {
        let x = rng.random_range(0..w) as i32;
        let y = rng.random_range(0..h) as i32;
        let radius = rng.random_range(1..=3);
        let hue = ((i * PARTICLE_HUE_STEP) % 360) as f32;
        draw_filled_circle_mut(&mut img, (x, y), radius, Rgb(hue_to_rgb(hue)));
    }
    Frame::from_rgb_image(img, frame.index())
}

pub fn sepia(frame: &Frame, _rng: &mut StdRng) -> Frame {
    map_pixels(frame, |[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        std::array::from_fn(|c| saturate(SEPIA[c][0] * r + SEPIA[c][1] * g + SEPIA[c][2] * b))
    })
}

pub fn neon(frame: &Frame, _rng: &mut StdRng) -> Frame {
    let glow = ColorMap::Plasma.apply(&edges(&to_gray(frame)), frame.index());
    blend(frame, 0.3, &glow, 0.7)
}

pub fn vintage(frame: &Frame, rng: &mut StdRng) -> Frame {
    map_pixels(frame, |px| {
        std::array::from_fn(|c| {
            let grain = px[c] as f32 + gaussian(rng, VINTAGE_NOISE_SIGMA);
            let grain = grain.round().clamp(0.0, 255.0);
            saturate(grain * VINTAGE_GAIN[c])
        })
    })
}

pub fn glitch(frame: &Frame, rng: &mut StdRng) -> Frame {
    let red_shift = rng.random_range(-GLITCH_MAX_SHIFT..=GLITCH_MAX_SHIFT);
    let blue_shift = rng.random_range(-GLITCH_MAX_SHIFT..=GLITCH_MAX_SHIFT);
    let shifted = shift_channels(frame, red_shift, blue_shift);
    let cool = ColorMap::Cool.apply(&edges(&to_gray(&shifted)), frame.index());
    blend(&shifted, 0.8, &cool, 0.2)
}

/// Roll the red and blue channels horizontally, wrapping at the edges.
/// Positive shifts move content to the right.
pub fn shift_channels(frame: &Frame, red_shift: i32, blue_shift: i32) -> Frame {
    let w = frame.width() as i64;
    if w == 0 {
        return frame.clone();
    }
    let src = frame.as_ndarray();
    let mut out = frame.clone();
    let mut dst = out.as_ndarray_mut();
    for ((y, x, c), value) in dst.indexed_iter_mut() {
        let shift = match c {
            0 => red_shift,
            2 => blue_shift,
            _ => continue,
        };
        let sx = (x as i64 - shift as i64).rem_euclid(w) as usize;
        *value = src[[y, sx, c]];
    }
    out
}

/// `round(a * wa + b * wb)` per channel, saturated.
fn blend(a: &Frame, wa: f32, b: &Frame, wb: f32) -> Frame {
    let mut out = a.clone();
    Zip::from(out.as_ndarray_mut())
        .and(a.as_ndarray())
        .and(b.as_ndarray())
        .for_each(|o, &x, &y| *o = saturate(x as f32 * wa + y as f32 * wb));
    out
}

fn map_pixels(frame: &Frame, mut f: impl FnMut([u8; 3]) -> [u8; 3]) -> Frame {
    let mut out = frame.clone();
    for px in out.data_mut().chunks_exact_mut(3) {
        let mapped = f([px[0], px[1], px[2]]);
        px.copy_from_slice(&mapped);
    }
    out
}

/// Zero-mean normal sample (Box-Muller).
fn gaussian(rng: &mut StdRng, sigma: f32) -> f32 {
    let u1: f32 = rng.random_range(f32::EPSILON..1.0);
    let u2: f32 = rng.random();
    sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Fully saturated, full-value color for a hue in degrees.
fn hue_to_rgb(hue: f32) -> [u8; 3] {
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    [saturate(r * 255.0), saturate(g * 255.0), saturate(b * 255.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn gradient(w: u32, h: u32) -> Frame {
        let mut frame = Frame::blank(w, h, 0);
        for y in 0..h {
            for x in 0..w {
                frame.set_pixel(x, y, [(x * 9 % 256) as u8, (y * 13 % 256) as u8, 90]);
            }
        }
        frame
    }

    #[test]
    fn test_thermal_black_and_white_extremes() {
        let mut frame = Frame::blank(2, 1, 0);
        frame.set_pixel(1, 0, [255, 255, 255]);
        let out = thermal(&frame, &mut rng());
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
        assert_eq!(out.pixel(1, 0), [255, 255, 255]);
    }

    #[test]
    fn test_high_contrast_is_gray() {
        let out = high_contrast(&gradient(24, 24), &mut rng());
        for px in out.data().chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_edge_enhanced_is_gray() {
        let out = edge_enhanced(&gradient(16, 16), &mut rng());
        for px in out.data().chunks_exact(3) {
            assert_eq!(px[0], px[2]);
        }
    }

    #[test]
    fn test_sepia_known_pixel_and_clamp() {
        let mut frame = Frame::blank(2, 1, 0);
        frame.set_pixel(0, 0, [100, 100, 100]);
        frame.set_pixel(1, 0, [255, 255, 255]);
        let out = sepia(&frame, &mut rng());
        // 100 * (0.393 + 0.769 + 0.189) = 135.1, etc.
        assert_eq!(out.pixel(0, 0), [135, 120, 95]);
        assert_eq!(out.pixel(1, 0), [255, 255, 241]);
    }

    #[test]
    fn test_neon_on_flat_frame_is_tinted_original() {
        let frame = Frame::new(vec![100; 8 * 8 * 3], 8, 8, 0);
        let out = neon(&frame, &mut rng());
        // No edges: 0.3 * 100 + 0.7 * plasma(0)
        let [r, g, b] = out.pixel(3, 3);
        assert_eq!((r, g), (39, 36));
        assert!((124..=125).contains(&b));
    }

    #[test]
    fn test_particles_change_some_pixels() {
        let frame = Frame::blank(64, 48, 0);
        let out = particles(&frame, &mut rng());
        assert_eq!(out.dimensions(), frame.dimensions());
        assert!(out.data().iter().any(|&v| v > 0));
    }

    #[test]
    fn test_vintage_clamps_without_wraparound() {
        let frame = Frame::new(vec![255; 16 * 16 * 3], 16, 16, 0);
        let out = vintage(&frame, &mut rng());
        for px in out.data().chunks_exact(3) {
            // Bright red/green stay bright; noise cannot wrap to dark values
            assert!(px[0] > 150);
            assert!(px[1] > 150);
        }
    }

    #[test]
    fn test_vintage_black_stays_dark_in_blue() {
        let frame = Frame::blank(16, 16, 0);
        let out = vintage(&frame, &mut rng());
        for px in out.data().chunks_exact(3) {
            assert!(px[2] < 160);
        }
    }

    #[test]
    fn test_shift_channels_wraps_and_keeps_green() {
        let mut frame = Frame::blank(4, 1, 0);
        for x in 0..4 {
            frame.set_pixel(x, 0, [x as u8, 10 + x as u8, 20 + x as u8]);
        }
        let out = shift_channels(&frame, 1, -1);
        assert_eq!(out.pixel(0, 0), [3, 10, 21]);
        assert_eq!(out.pixel(3, 0), [2, 13, 20]);
    }

    #[test]
    fn test_hue_to_rgb_primaries() {
        assert_eq!(hue_to_rgb(0.0), [255, 0, 0]);
        assert_eq!(hue_to_rgb(120.0), [0, 255, 0]);
        assert_eq!(hue_to_rgb(240.0), [0, 0, 255]);
        assert_eq!(hue_to_rgb(360.0), [255, 0, 0]);
    }

    #[test]
    fn test_effects_keep_dimensions_and_index() {
        let fns: [FilterFn; 8] = [
            thermal,
            edge_enhanced,
            high_contrast,
            particles,
            sepia,
            neon,
            vintage,
            glitch,
        ];
        let frame = Frame::new(gradient(13, 7).data().to_vec(), 13, 7, 4);
        for f in fns {
            let out = f(&frame, &mut rng());
            assert_eq!(out.dimensions(), (13, 7));
            assert_eq!(out.index(), 4);
        }
    }
}

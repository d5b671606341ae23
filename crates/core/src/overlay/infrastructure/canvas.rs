//! Clipped drawing helpers over `RgbImage`, using corner-inclusive
//! rectangles and baseline-anchored text.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut,
};
use imageproc::rect::Rect;

use crate::shared::point::PixelPoint;

/// Pixel height of text drawn at scale 1.0.
const TEXT_PX_PER_SCALE: f32 = 30.0;
/// Fraction of the pixel height that sits above the baseline.
const ASCENT: f32 = 0.75;

fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Option<Rect> {
    let (w, h) = (x1 - x0 + 1, y1 - y0 + 1);
    (w > 0 && h > 0).then(|| Rect::at(x0, y0).of_size(w as u32, h as u32))
}

pub fn fill_rect(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
    if let Some(r) = rect(x0, y0, x1, y1) {
        draw_filled_rect_mut(img, r, Rgb(color));
    }
}

pub fn outline_rect(
    img: &mut RgbImage,
    (x0, y0, x1, y1): (i32, i32, i32, i32),
    color: [u8; 3],
    thickness: i32,
) {
    for inset in 0..thickness {
        if let Some(r) = rect(x0 + inset, y0 + inset, x1 - inset, y1 - inset) {
            draw_hollow_rect_mut(img, r, Rgb(color));
        }
    }
}

pub fn line(img: &mut RgbImage, a: PixelPoint, b: PixelPoint, color: [u8; 3], thickness: i32) {
    let lo = -(thickness - 1) / 2;
    let hi = lo + thickness.max(1) - 1;
    for dy in lo..=hi {
        for dx in lo..=hi {
            draw_line_segment_mut(
                img,
                ((a.x + dx) as f32, (a.y + dy) as f32),
                ((b.x + dx) as f32, (b.y + dy) as f32),
                Rgb(color),
            );
        }
    }
}

pub fn polyline_closed(img: &mut RgbImage, points: &[PixelPoint], color: [u8; 3], thickness: i32) {
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        line(img, a, b, color, thickness);
    }
}

pub fn dot(img: &mut RgbImage, center: PixelPoint, radius: i32, color: [u8; 3]) {
    draw_filled_circle_mut(img, (center.x, center.y), radius, Rgb(color));
}

/// Blend the top `height` rows toward black, keeping 30% of the original.
pub fn darken_band(img: &mut RgbImage, height: u32) {
    let rows = height.min(img.height());
    for y in 0..rows {
        for x in 0..img.width() {
            let px = img.get_pixel_mut(x, y);
            for v in px.0.iter_mut() {
                *v = ((*v as u16 * 3 + 5) / 10) as u8;
            }
        }
    }
}

/// Text whose baseline starts at `(x, baseline)`. Skipped without a font.
pub fn text(
    img: &mut RgbImage,
    font: Option<&FontVec>,
    (x, baseline): (i32, i32),
    scale: f32,
    color: [u8; 3],
    content: &str,
) {
    let Some(font) = font else {
        return;
    };
    let px = TEXT_PX_PER_SCALE * scale;
    let top = baseline - (px * ASCENT).round() as i32;
    draw_text_mut(img, Rgb(color), x, top, PxScale::from(px), font, content);
}

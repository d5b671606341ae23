use std::path::Path;

use ab_glyph::FontVec;

use crate::gesture::domain::hand_landmarks::HandPointPair;
use crate::overlay::domain::overlay_model::{hand_labels, OverlayState};
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::shared::constants::{APP_TITLE, HEADER_HEIGHT};
use crate::shared::frame::Frame;
use crate::shared::point::PixelPoint;

use super::canvas;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const YELLOW: [u8; 3] = [255, 255, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const MAGENTA: [u8; 3] = [255, 0, 255];
const RED: [u8; 3] = [255, 0, 0];
const PANEL_BORDER: [u8; 3] = [100, 100, 100];

const BUTTON_FILL: [u8; 3] = [50, 50, 50];
const BUTTON_BORDER: [u8; 3] = [100, 100, 100];
const ACTIVE_FILL: [u8; 3] = [0, 200, 0];
const ACTIVE_BORDER: [u8; 3] = [0, 255, 0];

const MARKER_RADIUS: i32 = 10;

/// Renders the UI with imageproc primitives. Text needs a TrueType font;
/// without one only shapes are drawn.
#[derive(Default)]
pub struct ImageprocRenderer {
    font: Option<FontVec>,
}

impl ImageprocRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(font: FontVec) -> Self {
        Self { font: Some(font) }
    }

    pub fn from_font_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("failed to read font {}: {e}", path.display()))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| format!("invalid font {}: {e}", path.display()))?;
        Ok(Self::with_font(font))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

/// Draw on an `RgbImage` copy and write the pixels back.
fn paint(frame: &mut Frame, draw: impl FnOnce(&mut image::RgbImage)) {
    let mut img = frame.to_rgb_image();
    draw(&mut img);
    frame.data_mut().copy_from_slice(img.as_raw());
}

impl OverlayRenderer for ImageprocRenderer {
    fn draw_overlay(&self, frame: &mut Frame, state: &OverlayState<'_>) {
        let font = self.font.as_ref();
        let w = frame.width() as i32;

        paint(frame, |img| {
            canvas::darken_band(img, HEADER_HEIGHT);
            canvas::text(img, font, (20, 35), 1.2, YELLOW, APP_TITLE);
            canvas::text(img, font, (20, 65), 0.6, WHITE, &state.status_line());

            for button in state.buttons {
                let active = button.filter == state.selected;
                let (fill, border, ink) = if active {
                    (ACTIVE_FILL, ACTIVE_BORDER, BLACK)
                } else {
                    (BUTTON_FILL, BUTTON_BORDER, WHITE)
                };
                let (tl, br) = button.bounds();
                canvas::fill_rect(img, tl.x, tl.y, br.x, br.y, fill);
                canvas::outline_rect(img, (tl.x, tl.y, br.x, br.y), border, 2);
                let (cx, cy) = (button.center_x, button.center_y);
                let number = button.filter.index().to_string();
                canvas::text(img, font, (cx - 8, cy - 5), 0.7, ink, &number);
                canvas::text(img, font, (cx - 35, cy + 20), 0.4, ink, button.label());
            }

            let lines = state.gesture_lines();
            if !lines.is_empty() {
                canvas::fill_rect(img, w - 250, 100, w - 10, 200, BLACK);
                canvas::outline_rect(img, (w - 250, 100, w - 10, 200), PANEL_BORDER, 2);
                canvas::text(img, font, (w - 240, 125), 0.6, WHITE, "Gesture Info:");
                for (i, line) in lines.iter().enumerate() {
                    let baseline = 145 + 20 * i as i32;
                    canvas::text(img, font, (w - 240, baseline), 0.5, YELLOW, line);
                }
            }

            if let (true, Some(roi)) = (state.apply_mode, state.roi) {
                canvas::polyline_closed(img, roi.points(), GREEN, 2);
            }
        });
    }

    fn draw_tracking(&self, panel: &mut Frame, hands: &[HandPointPair]) {
        let font = self.font.as_ref();
        paint(panel, |img| {
            for (slot, hand) in hands.iter().enumerate() {
                let color = if slot == 0 { GREEN } else { MAGENTA };
                canvas::dot(img, hand.thumb, MARKER_RADIUS, color);
                canvas::dot(img, hand.index, MARKER_RADIUS, color);
                canvas::line(img, hand.thumb, hand.index, color, 3);

                let (name, distance) = hand_labels(slot, hand);
                let anchor = hand.thumb.x + 15;
                canvas::text(img, font, (anchor, hand.thumb.y), 0.5, color, &name);
                canvas::text(img, font, (anchor, hand.thumb.y + 20), 0.4, color, &distance);
            }
        });
    }

    fn draw_recording_indicator(&self, frame: &mut Frame) {
        let font = self.font.as_ref();
        let w = frame.width() as i32;
        paint(frame, |img| {
            canvas::dot(img, PixelPoint::new(w - 40, 30), MARKER_RADIUS, RED);
            canvas::text(img, font, (w - 70, 35), 0.5, RED, "REC");
        });
    }
}

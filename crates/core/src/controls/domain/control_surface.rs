use crate::filters::domain::filter_kind::FilterKind;
use crate::shared::constants::{
    BUTTON_HALF_HEIGHT, BUTTON_ROW_OFFSET, BUTTON_SPACING, BUTTON_WIDTH,
};
use crate::shared::point::PixelPoint;

/// One virtual button. The hit-box is open: points on the border miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub center_x: i32,
    pub center_y: i32,
    pub half_width: i32,
    pub half_height: i32,
    pub filter: FilterKind,
}

impl Button {
    pub fn label(&self) -> &'static str {
        self.filter.label()
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        (self.center_x - self.half_width) < point.x
            && point.x < (self.center_x + self.half_width)
            && (self.center_y - self.half_height) < point.y
            && point.y < (self.center_y + self.half_height)
    }

    /// Top-left and bottom-right corners.
    pub fn bounds(&self) -> (PixelPoint, PixelPoint) {
        (
            PixelPoint::new(self.center_x - self.half_width, self.center_y - self.half_height),
            PixelPoint::new(self.center_x + self.half_width, self.center_y + self.half_height),
        )
    }
}

/// The row of filter buttons, centred horizontally near the bottom edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlSurface {
    buttons: Vec<Button>,
}

impl ControlSurface {
    pub fn layout(width: u32, height: u32) -> Self {
        let count = FilterKind::ALL.len() as i32;
        let total = count * BUTTON_WIDTH + (count - 1) * BUTTON_SPACING;
        let start_x = (width as i32 - total).div_euclid(2);
        let center_y = height as i32 - BUTTON_ROW_OFFSET;

        let buttons = FilterKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &filter)| Button {
                center_x: start_x + BUTTON_WIDTH / 2 + i as i32 * (BUTTON_WIDTH + BUTTON_SPACING),
                center_y,
                half_width: BUTTON_WIDTH / 2,
                half_height: BUTTON_HALF_HEIGHT,
                filter,
            })
            .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// First button containing `point`.
    pub fn hit_test(&self, point: PixelPoint) -> Option<FilterKind> {
        self.buttons
            .iter()
            .find(|b| b.contains(point))
            .map(|b| b.filter)
    }

    /// Resolve hover across fingertips in detector order; the first
    /// fingertip that lands on any button decides.
    pub fn resolve_hover(&self, fingertips: &[PixelPoint]) -> Option<FilterKind> {
        fingertips.iter().find_map(|&tip| self.hit_test(tip))
    }
}

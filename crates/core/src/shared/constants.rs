/// Landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

/// Fingertip landmarks in [thumb, index, middle, ring, pinky] order.
pub const FINGER_TIPS: [usize; 5] = [4, 8, 12, 16, 20];
/// Proximal joint compared against each fingertip.
pub const FINGER_JOINTS: [usize; 5] = [3, 6, 10, 14, 18];

pub const FILTER_COUNT: usize = 8;

pub const BUTTON_WIDTH: i32 = 80;
pub const BUTTON_SPACING: i32 = 15;
pub const BUTTON_HALF_HEIGHT: i32 = 25;
/// Distance from the bottom edge to the button row's centre line.
pub const BUTTON_ROW_OFFSET: i32 = 50;

pub const HEADER_HEIGHT: u32 = 80;

pub const RECORDING_FPS: f64 = 20.0;
pub const RECORDING_PREFIX: &str = "gesture_filter_recording";
pub const RECORDING_EXTENSION: &str = "avi";

pub const MAX_DISPLAY_HEIGHT: u32 = 960;

pub const APP_TITLE: &str = "Enhanced Gesture Filters v2.0";

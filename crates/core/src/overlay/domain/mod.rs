pub mod overlay_model;
pub mod overlay_renderer;

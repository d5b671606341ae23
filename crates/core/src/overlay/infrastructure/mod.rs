mod canvas;
pub mod imageproc_renderer;

pub mod compositing;
pub mod controls;
pub mod display;
pub mod filters;
pub mod gesture;
pub mod input;
pub mod overlay;
pub mod pipeline;
pub mod recording;
pub mod region;
pub mod shared;
pub mod video;

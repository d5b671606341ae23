pub mod constants;
pub mod fps_meter;
pub mod frame;
pub mod point;
pub mod video_metadata;

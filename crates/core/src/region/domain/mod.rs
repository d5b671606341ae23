pub mod polygon_mask;
pub mod region_tracker;

pub mod filter_kind;
pub mod frame_filter;

mod color_map;
mod effects;
pub mod filter_bank;
mod grayscale;

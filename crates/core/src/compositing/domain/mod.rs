pub mod masked_compositor;

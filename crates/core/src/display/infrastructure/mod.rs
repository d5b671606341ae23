pub mod snapshot_display;

pub mod scripted_key_source;
pub mod stdin_key_source;

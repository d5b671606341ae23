pub mod key_command;
pub mod key_source;

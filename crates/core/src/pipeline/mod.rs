pub mod frame_processor;
pub mod infrastructure;
pub mod pipeline_logger;
pub mod run_session_use_case;
pub mod session_config;
pub mod session_state;

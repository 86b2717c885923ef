pub mod command_key_sender;
pub mod log_key_sender;

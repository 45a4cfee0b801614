pub mod app_state;
pub mod models;
pub mod prompt;
pub mod server_config;

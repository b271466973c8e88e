pub mod app_config;
pub mod cors_config;
pub mod database_config;
pub mod firebase_config;
pub mod local_storage_config;
pub mod openai_config;
pub mod server_config;

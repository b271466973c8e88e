use super::{
    cors_config, firebase_config::FirebaseConfig, local_storage_config::LocalStorageConfig,
    openai_config::OpenAIConfig, server_config::ServerConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub firebase: FirebaseConfig,
    pub local_storage: LocalStorageConfig,
    pub openai: OpenAIConfig,
}

impl AppConfig {
    /// Fails when a required variable is missing, before anything connects.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            firebase: FirebaseConfig::from_env()?,
            local_storage: LocalStorageConfig::from_env(),
            openai: OpenAIConfig::from_env()?,
        })
    }
}

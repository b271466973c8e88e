use anyhow::Context;

/// Configuration for OpenAI API access.
pub struct OpenAIConfig {
    pub api_key: String,
    /// Chat model; the client default applies when unset.
    pub model: Option<String>,
}

impl OpenAIConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
        Ok(Self {
            api_key,
            model: non_blank(std::env::var("OPENAI_MODEL").ok()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

use anyhow::Context;

pub struct FirebaseConfig {
    pub project_id: String,
}

impl FirebaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let project_id =
            std::env::var("FIREBASE_PROJECT_ID").context("FIREBASE_PROJECT_ID must be set")?;
        Ok(Self { project_id })
    }
}

use serde::{Deserialize, Serialize};

/// Identifier of an auth-provider account (Firebase UID).
/// Anonymous visitors get one too, so every cart owner has a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Scope of browser-local storage: one browser profile on one device.
///
/// The local cart is keyed by this and nothing else; it carries no notion
/// of who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrowserProfile(String);

impl BrowserProfile {
    /// Returns `None` for blank ids or ids containing characters outside
    /// `[A-Za-z0-9_-]`, since adapters may use the id as a storage key.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= 128
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BrowserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_user_id() {
        let user_id = UserId::new("firebase-uid-123");
        assert_eq!(format!("{}", user_id), "firebase-uid-123");
        assert_eq!(user_id.as_str(), "firebase-uid-123");
    }

    #[test]
    fn should_compare_user_ids_for_equality() {
        assert_eq!(UserId::new("same-user"), UserId::from("same-user"));
        assert_ne!(UserId::new("same-user"), UserId::new("other-user"));
    }

    #[test]
    fn should_accept_uuid_like_browser_profile() {
        let profile = BrowserProfile::parse(" 3f0c9a2e-1b7d-4c55-9a1e-7e1f0b2c4d5a ").unwrap();
        assert_eq!(profile.as_str(), "3f0c9a2e-1b7d-4c55-9a1e-7e1f0b2c4d5a");
    }

    #[test]
    fn should_reject_blank_browser_profile() {
        assert!(BrowserProfile::parse("   ").is_none());
    }

    #[test]
    fn should_reject_browser_profile_with_path_characters() {
        assert!(BrowserProfile::parse("../etc/passwd").is_none());
        assert!(BrowserProfile::parse("a/b").is_none());
    }
}

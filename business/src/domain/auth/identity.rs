use serde::{Deserialize, Serialize};

use crate::domain::shared::value_objects::UserId;

/// How a verified account signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInProvider {
    Password,
    Phone,
    /// Federated providers (`google.com`, `facebook.com`, ...).
    Federated(String),
}

impl SignInProvider {
    pub fn from_claim(provider: &str) -> Self {
        match provider {
            "password" => SignInProvider::Password,
            "phone" => SignInProvider::Phone,
            other => SignInProvider::Federated(other.to_string()),
        }
    }
}

impl std::fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignInProvider::Password => write!(f, "password"),
            SignInProvider::Phone => write!(f, "phone"),
            SignInProvider::Federated(name) => write!(f, "{}", name),
        }
    }
}

/// A non-anonymous account backed by an email or phone credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccount {
    pub user_id: UserId,
    pub provider: SignInProvider,
    pub email: Option<String>,
    pub email_verified: bool,
    /// Unix timestamp of the sign-in that produced this session. Two tokens
    /// from the same login share it; a fresh login changes it.
    pub login_generation: i64,
}

impl VerifiedAccount {
    /// Password accounts must confirm their email before checking out.
    /// Phone and federated sign-ins are verified by the provider itself.
    pub fn can_checkout(&self) -> bool {
        match self.provider {
            SignInProvider::Password => self.email_verified,
            SignInProvider::Phone | SignInProvider::Federated(_) => true,
        }
    }
}

/// Who is using the storefront right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthIdentity {
    /// Auto-provisioned visitor session without credentials.
    Anonymous { user_id: UserId },
    Verified(VerifiedAccount),
}

impl AuthIdentity {
    pub fn user_id(&self) -> &UserId {
        match self {
            AuthIdentity::Anonymous { user_id } => user_id,
            AuthIdentity::Verified(account) => &account.user_id,
        }
    }

    pub fn verified(&self) -> Option<&VerifiedAccount> {
        match self {
            AuthIdentity::Anonymous { .. } => None,
            AuthIdentity::Verified(account) => Some(account),
        }
    }
}

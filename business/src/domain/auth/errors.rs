/// Credential and verification failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("auth.missing_token")]
    MissingToken,
    #[error("auth.invalid_token")]
    InvalidToken,
    #[error("auth.certs_unavailable")]
    CertsUnavailable,
    #[error("auth.anonymous_not_allowed")]
    AnonymousNotAllowed,
}

//! Identity-provider boundary

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Decoded identity of an authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject identifier assigned by the provider
    pub uid: String,
    pub email: Option<String>,
}

/// Why a credential was not accepted.
///
/// Never shown to callers; the request context only records whether
/// verification succeeded.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("signing keys unavailable: {0}")]
    KeyFetch(#[from] reqwest::Error),

    #[error("token header has no key id")]
    MissingKeyId,

    #[error("no signing key with id '{0}'")]
    UnknownKey(String),

    #[error("token has an empty subject")]
    EmptySubject,

    #[error("no identity provider configured")]
    Disabled,
}

/// Verifies bearer credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}

/// Provider used when none is configured: every caller is anonymous.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledVerifier;

#[async_trait]
impl IdentityProvider for DisabledVerifier {
    async fn verify(&self, _token: &str) -> Result<Identity, VerifyError> {
        Err(VerifyError::Disabled)
    }
}

//! Per-request authentication outcome

use serde::Serialize;
use tracing::debug;

use super::identity::{Identity, IdentityProvider};

/// Authentication outcome attached to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub user: Option<Identity>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: Identity) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// Derive the context from an `Authorization` header value.
    ///
    /// A missing header, a blank credential, or any verification failure
    /// yields the anonymous context. The failure reason is only logged.
    pub async fn resolve(header: Option<&str>, provider: &dyn IdentityProvider) -> Self {
        let Some(token) = header.and_then(bearer_token) else {
            return Self::anonymous();
        };

        match provider.verify(token).await {
            Ok(identity) => Self::authenticated(identity),
            Err(e) => {
                debug!(error = %e, "Credential rejected, continuing unauthenticated");
                Self::anonymous()
            }
        }
    }
}

/// Extract the credential from an `Authorization` header value.
///
/// A leading `Bearer` scheme is stripped case-insensitively; a bare token is
/// accepted as-is.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = match header.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => header,
    };

    if token.is_empty() || token.eq_ignore_ascii_case("bearer") {
        None
    } else {
        Some(token)
    }
}

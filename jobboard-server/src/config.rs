//! Application configuration
//!
//! Built by the binary from its arguments and environment, then handed to
//! [`AppState`](crate::state::AppState). Nothing here reads globals.

use std::sync::Arc;

use crate::auth::{
    DisabledVerifier, FirebaseVerifier, GatePolicy, IdentityProvider, SharedSecretVerifier,
};

/// Which identity provider verifies bearer credentials
#[derive(Clone, PartialEq, Eq)]
pub enum IdentityConfig {
    /// Firebase ID tokens for the given project
    Firebase { project_id: String },
    /// HS256 tokens signed with a shared secret
    SharedSecret { secret: String },
    /// Every caller is anonymous
    Disabled,
}

impl IdentityConfig {
    /// A Firebase project id wins over a shared secret. Blank values count
    /// as unset.
    pub fn select(firebase_project_id: Option<String>, jwt_secret: Option<String>) -> Self {
        let present = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        match (present(firebase_project_id), present(jwt_secret)) {
            (Some(project_id), _) => Self::Firebase { project_id },
            (None, Some(secret)) => Self::SharedSecret { secret },
            (None, None) => Self::Disabled,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Firebase { .. } => "firebase",
            Self::SharedSecret { .. } => "shared-secret",
            Self::Disabled => "disabled",
        }
    }

    pub fn into_provider(self) -> Arc<dyn IdentityProvider> {
        match self {
            Self::Firebase { project_id } => {
                tracing::info!(project_id = %project_id, "Verifying Firebase ID tokens");
                Arc::new(FirebaseVerifier::new(&project_id))
            }
            Self::SharedSecret { secret } => {
                tracing::info!("Verifying HS256 tokens with shared secret");
                Arc::new(SharedSecretVerifier::new(secret.as_bytes()))
            }
            Self::Disabled => {
                tracing::warn!(
                    "No identity provider configured; gated operations will always be rejected"
                );
                Arc::new(DisabledVerifier)
            }
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firebase { project_id } => f
                .debug_struct("Firebase")
                .field("project_id", project_id)
                .finish(),
            Self::SharedSecret { .. } => f
                .debug_struct("SharedSecret")
                .field("secret", &"<redacted>")
                .finish(),
            Self::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Authentication and authorization settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub identity: IdentityConfig,
    /// Gate application status updates and deletes as well
    pub gate_application_mutations: bool,
}

impl AppConfig {
    pub fn policy(&self) -> GatePolicy {
        GatePolicy::from_flags(self.gate_application_mutations)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            identity: IdentityConfig::Disabled,
            gate_application_mutations: false,
        }
    }
}

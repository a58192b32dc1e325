//! Authentication and authorization
//!
//! - `identity`: identity-provider boundary (`IdentityProvider`)
//! - `firebase` / `shared_secret`: provider implementations
//! - `context`: per-request authentication outcome
//! - `gate`: per-operation authorization policy

pub mod context;
pub mod firebase;
pub mod gate;
pub mod identity;
pub mod shared_secret;

pub use context::{bearer_token, AuthContext};
pub use firebase::FirebaseVerifier;
pub use gate::{require_auth, AuthError, Gate, GatePolicy, Operation};
pub use identity::{DisabledVerifier, Identity, IdentityProvider, VerifyError};
pub use shared_secret::SharedSecretVerifier;

//! HS256 tokens signed with a shared secret (local development, tests)

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use super::identity::{Identity, IdentityProvider, VerifyError};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    email: Option<String>,
}

pub struct SharedSecretVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SharedSecretVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;

        if data.claims.sub.trim().is_empty() {
            return Err(VerifyError::EmptySubject);
        }

        Ok(Identity {
            uid: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(secret: &[u8], claims: serde_json::Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn exp(offset_secs: i64) -> i64 {
        chrono::Utc::now().timestamp() + offset_secs
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let verifier = SharedSecretVerifier::new(b"secret");
        let t = token(
            b"secret",
            json!({ "sub": "user-1", "email": "admin@example.com", "exp": exp(3600) }),
        );

        let identity = verifier.verify(&t).await.unwrap();
        assert_eq!(identity.uid, "user-1");
        assert_eq!(identity.email.as_deref(), Some("admin@example.com"));
    }

    #[tokio::test]
    async fn rejects_wrong_secret() {
        let verifier = SharedSecretVerifier::new(b"secret");
        let t = token(b"other", json!({ "sub": "user-1", "exp": exp(3600) }));
        assert!(matches!(
            verifier.verify(&t).await.unwrap_err(),
            VerifyError::Jwt(_)
        ));
    }

    #[tokio::test]
    async fn rejects_expired() {
        let verifier = SharedSecretVerifier::new(b"secret");
        let t = token(b"secret", json!({ "sub": "user-1", "exp": exp(-3600) }));
        assert!(verifier.verify(&t).await.is_err());
    }

    #[tokio::test]
    async fn rejects_empty_subject() {
        let verifier = SharedSecretVerifier::new(b"secret");
        let t = token(b"secret", json!({ "sub": " ", "exp": exp(3600) }));
        assert!(matches!(
            verifier.verify(&t).await.unwrap_err(),
            VerifyError::EmptySubject
        ));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let verifier = SharedSecretVerifier::new(b"secret");
        assert!(verifier.verify("not.a.jwt").await.is_err());
    }
}

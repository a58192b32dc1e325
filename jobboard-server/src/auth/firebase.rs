//! Firebase ID token verification
//!
//! ID tokens are RS256 JWTs signed by Google. Signing keys are published as
//! a JWKS document; they are fetched on first use and re-fetched when a
//! token names a key id we have not seen, at most once per refresh interval.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use super::identity::{Identity, IdentityProvider, VerifyError};

/// Google's JWKS endpoint for Firebase Auth ID tokens
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Minimum time between two JWKS fetches
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on a single JWKS fetch
pub const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
}

#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    /// Last fetch attempt, successful or not
    fetched_at: Option<Instant>,
}

pub struct FirebaseVerifier {
    http: reqwest::Client,
    jwks_url: String,
    validation: Validation,
    refresh_interval: Duration,
    fetch_timeout: Duration,
    cache: RwLock<KeyCache>,
}

impl FirebaseVerifier {
    pub fn new(project_id: &str) -> Self {
        Self::with_jwks_url(project_id, FIREBASE_JWKS_URL)
    }

    /// Verifier reading keys from a custom JWKS endpoint (emulators, tests).
    pub fn with_jwks_url(project_id: &str, jwks_url: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[project_id]);
        validation.set_issuer(&[format!("https://securetoken.google.com/{}", project_id)]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

        Self {
            http: reqwest::Client::new(),
            jwks_url: jwks_url.to_owned(),
            validation,
            refresh_interval: MIN_REFRESH_INTERVAL,
            fetch_timeout: JWKS_FETCH_TIMEOUT,
            cache: RwLock::new(KeyCache::default()),
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, VerifyError> {
        if let Some(key) = self.cache.read().await.keys.get(kid) {
            return Ok(key.clone());
        }

        // Concurrent misses queue here; only the first one fetches.
        let mut cache = self.cache.write().await;
        if let Some(key) = cache.keys.get(kid) {
            return Ok(key.clone());
        }

        let refresh_due = cache
            .fetched_at
            .map_or(true, |at| at.elapsed() >= self.refresh_interval);
        if !refresh_due {
            debug!(kid, "Unknown signing key, refresh not due yet");
            return Err(VerifyError::UnknownKey(kid.to_owned()));
        }

        cache.fetched_at = Some(Instant::now());
        cache.keys = self.fetch_keys().await?;

        cache
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| VerifyError::UnknownKey(kid.to_owned()))
    }

    async fn fetch_keys(&self) -> Result<HashMap<String, DecodingKey>, VerifyError> {
        let set: JwkSet = self
            .http
            .get(&self.jwks_url)
            .timeout(self.fetch_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut keys = HashMap::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            keys.insert(kid, DecodingKey::from_jwk(jwk)?);
        }

        info!(count = keys.len(), "Refreshed identity provider signing keys");
        Ok(keys)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(VerifyError::MissingKeyId)?;
        let key = self.key_for(&kid).await?;

        let data = decode::<FirebaseClaims>(token, &key, &self.validation)?;
        if data.claims.sub.trim().is_empty() {
            return Err(VerifyError::EmptySubject);
        }

        debug!(uid = %data.claims.sub, "Verified ID token");
        Ok(Identity {
            uid: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{routing::get, Json, Router};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    use crate::auth::AuthContext;

    const PROJECT: &str = "demo-project";
    const KID: &str = "test-key-1";
    const TEST_KEY_PEM: &str = include_str!("testdata/rs256_test_key.pem");
    const TEST_JWKS: &str = include_str!("testdata/rs256_test_jwks.json");

    /// Serve the test JWKS on a local port, counting fetches.
    async fn serve_jwks(delay: Duration) -> (String, Arc<AtomicUsize>) {
        let jwks: Value = serde_json::from_str(TEST_JWKS).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = Router::new().route(
            "/jwks",
            get(move || {
                let counter = counter.clone();
                let jwks = jwks.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    Json(jwks)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (format!("http://{addr}/jwks"), hits)
    }

    fn claims() -> Value {
        let now = chrono::Utc::now().timestamp();
        json!({
            "sub": "firebase-uid",
            "email": "dev@example.com",
            "aud": PROJECT,
            "iss": format!("https://securetoken.google.com/{PROJECT}"),
            "iat": now,
            "exp": now + 3600,
        })
    }

    fn id_token(kid: &str, claims: &Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_owned());
        let key = EncodingKey::from_rsa_pem(TEST_KEY_PEM.as_bytes()).unwrap();
        encode(&header, claims, &key).unwrap()
    }

    #[tokio::test]
    async fn verifies_signed_token_and_caches_keys() {
        let (url, hits) = serve_jwks(Duration::ZERO).await;
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, &url);
        let token = id_token(KID, &claims());

        let identity = verifier.verify(&token).await.unwrap();
        assert_eq!(identity.uid, "firebase-uid");
        assert_eq!(identity.email.as_deref(), Some("dev@example.com"));

        verifier.verify(&token).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejects_wrong_audience_issuer_and_expired() {
        let (url, _) = serve_jwks(Duration::ZERO).await;
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, &url);

        let mut wrong_aud = claims();
        wrong_aud["aud"] = json!("someone-elses-project");

        let mut wrong_iss = claims();
        wrong_iss["iss"] = json!("https://accounts.example.com/demo-project");

        let mut expired = claims();
        expired["exp"] = json!(chrono::Utc::now().timestamp() - 3600);

        for bad in [wrong_aud, wrong_iss, expired] {
            let err = verifier.verify(&id_token(KID, &bad)).await.unwrap_err();
            assert!(matches!(err, VerifyError::Jwt(_)), "{bad}: {err}");
        }
    }

    #[tokio::test]
    async fn rejects_empty_subject() {
        let (url, _) = serve_jwks(Duration::ZERO).await;
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, &url);

        let mut blank = claims();
        blank["sub"] = json!("  ");
        assert!(matches!(
            verifier.verify(&id_token(KID, &blank)).await.unwrap_err(),
            VerifyError::EmptySubject
        ));
    }

    #[tokio::test]
    async fn rejects_token_signed_with_other_key() {
        let (url, _) = serve_jwks(Duration::ZERO).await;
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, &url);

        // Right kid, wrong algorithm and key
        let mut header = Header::default();
        header.kid = Some(KID.into());
        let forged = encode(&header, &claims(), &EncodingKey::from_secret(b"x")).unwrap();

        assert!(matches!(
            verifier.verify(&forged).await.unwrap_err(),
            VerifyError::Jwt(_)
        ));
    }

    #[tokio::test]
    async fn unknown_kid_triggers_one_refresh() {
        let (url, hits) = serve_jwks(Duration::ZERO).await;
        let verifier =
            FirebaseVerifier::with_jwks_url(PROJECT, &url).with_refresh_interval(Duration::ZERO);

        verifier.verify(&id_token(KID, &claims())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let err = verifier
            .verify(&id_token("rotated-key", &claims()))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::UnknownKey(kid) if kid == "rotated-key"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        // Known key still served from cache
        verifier.verify(&id_token(KID, &claims())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_kids_do_not_refetch_within_interval() {
        let (url, hits) = serve_jwks(Duration::ZERO).await;
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, &url);

        for kid in ["a", "b", "c", "d"] {
            let err = verifier.verify(&id_token(kid, &claims())).await.unwrap_err();
            assert!(matches!(err, VerifyError::UnknownKey(_)));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        verifier.verify(&id_token(KID, &claims())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn slow_key_endpoint_times_out_to_anonymous() {
        let (url, _) = serve_jwks(Duration::from_secs(10)).await;
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, &url)
            .with_fetch_timeout(Duration::from_millis(100));
        let header = format!("Bearer {}", id_token(KID, &claims()));

        let started = std::time::Instant::now();
        let ctx = AuthContext::resolve(Some(&header), &verifier).await;
        assert_eq!(ctx, AuthContext::anonymous());
        assert!(started.elapsed() < Duration::from_secs(5));

        // The failed attempt counts toward the refresh interval.
        let started = std::time::Instant::now();
        let err = verifier.verify(&id_token(KID, &claims())).await.unwrap_err();
        assert!(matches!(err, VerifyError::UnknownKey(_)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn rejects_token_without_kid() {
        let verifier = FirebaseVerifier::with_jwks_url(PROJECT, "http://127.0.0.1:9/jwks");
        let token = encode(
            &Header::default(),
            &json!({ "sub": "u", "exp": 4_000_000_000u64 }),
            &EncodingKey::from_secret(b"x"),
        )
        .unwrap();

        assert!(matches!(
            verifier.verify(&token).await.unwrap_err(),
            VerifyError::MissingKeyId
        ));
    }

    #[tokio::test]
    async fn rejects_malformed_token() {
        let verifier = FirebaseVerifier::new(PROJECT);
        assert!(matches!(
            verifier.verify("garbage").await.unwrap_err(),
            VerifyError::Jwt(_)
        ));
    }
}

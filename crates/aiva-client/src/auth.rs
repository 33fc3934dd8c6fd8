//! Service account authentication
//!
//! Exchanges a signed JWT assertion for a short-lived bearer token at the
//! key's token URI (`urn:ietf:params:oauth:grant-type:jwt-bearer` grant).
//!
//! There is no token cache: every call performs a fresh exchange, so tokens
//! stay request-scoped and are never reused across queries.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// OAuth scope granting access to the reasoning engine API.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Lifetime requested for the signed assertion.
const ASSERTION_LIFETIME_SECS: u64 = 3600;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Service account credentials, deserialized from the key JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Load and parse a key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| AuthError::KeyFile {
            path: path.display().to_string(),
            source,
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&contents)?;
        Ok(key)
    }
}

/// JWT claims for the Google OAuth jwt-bearer grant.
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    sub: String,
    aud: String,
    iat: u64,
    exp: u64,
    scope: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Exchanges a service account key for bearer tokens.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    scope: String,
    http: Client,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, scope: impl Into<String>) -> Self {
        Self {
            key,
            scope: scope.into(),
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    /// Sign the RS256 assertion presented to the token endpoint.
    fn signed_assertion(&self) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let claims = JwtClaims {
            iss: self.key.client_email.clone(),
            sub: self.key.client_email.clone(),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
            scope: self.scope.clone(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key.private_key_id.clone());

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&header, &claims, &encoding_key)?)
    }

    /// Fetch a fresh access token from the key's token URI.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        debug!("requesting service account access token");

        let assertion = self.signed_assertion()?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Exchange { status, body });
        }

        let token: TokenResponse = response.json().await?;
        debug!(expires_in = token.expires_in, "access token obtained");
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::pkcs8::EncodePublicKey;

    fn test_key_pair() -> (String, String) {
        let private = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
        let private_pem = private
            .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
            .unwrap()
            .to_string();
        let public_pem = private
            .to_public_key()
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
            .unwrap();
        (private_pem, public_pem)
    }

    fn key_with_pem(private_pem: String) -> ServiceAccountKey {
        ServiceAccountKey {
            key_type: "service_account".to_string(),
            project_id: "test-project".to_string(),
            private_key_id: "test-key-id".to_string(),
            private_key: private_pem,
            client_email: "svc@test-project.iam.gserviceaccount.com".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn assertion_carries_expected_claims() {
        let (private_pem, public_pem) = test_key_pair();
        let auth = ServiceAccountAuth::new(key_with_pem(private_pem), CLOUD_PLATFORM_SCOPE);

        let assertion = auth.signed_assertion().unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.googleapis.com/token"]);
        let decoded = decode::<serde_json::Value>(
            &assertion,
            &DecodingKey::from_rsa_pem(public_pem.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        let claims = decoded.claims;
        assert_eq!(claims["iss"], "svc@test-project.iam.gserviceaccount.com");
        assert_eq!(claims["sub"], "svc@test-project.iam.gserviceaccount.com");
        assert_eq!(claims["scope"], CLOUD_PLATFORM_SCOPE);
        let lifetime = claims["exp"].as_u64().unwrap() - claims["iat"].as_u64().unwrap();
        assert_eq!(lifetime, ASSERTION_LIFETIME_SECS);
        assert_eq!(decoded.header.kid.as_deref(), Some("test-key-id"));
    }

    #[test]
    fn garbage_private_key_is_a_jwt_error() {
        let key = key_with_pem("not a pem".to_string());
        let auth = ServiceAccountAuth::new(key, CLOUD_PLATFORM_SCOPE);
        assert!(matches!(auth.signed_assertion(), Err(AuthError::Jwt(_))));
    }

    #[test]
    fn missing_key_file_is_a_key_file_error() {
        let err = ServiceAccountKey::from_file("/does/not/exist.json").unwrap_err();
        assert!(matches!(err, AuthError::KeyFile { .. }));
    }

    #[test]
    fn malformed_key_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, "{\"type\": \"service_account\"").unwrap();
        let err = ServiceAccountKey::from_file(&path).unwrap_err();
        assert!(matches!(err, AuthError::KeyParse(_)));
    }
}

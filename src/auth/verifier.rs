use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, Claims};
use crate::config::AuthConfig;

/// A single signing key as published by the identity provider. Only the
/// RSA members the verifier actually reads are modeled; anything else in
/// the document is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

impl Jwk {
    /// Build a decoding key from the RSA public components.
    fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        if self.kty != "RSA" {
            return Err(AuthError::KeyLookupFailure(format!(
                "unsupported key type {}",
                self.kty
            )));
        }
        let (n, e) = match (&self.n, &self.e) {
            (Some(n), Some(e)) => (n, e),
            _ => {
                return Err(AuthError::KeyLookupFailure(
                    "signing key is missing RSA components".to_string(),
                ))
            }
        };
        DecodingKey::from_rsa_components(n, e)
            .map_err(|e| AuthError::KeyLookupFailure(format!("unusable signing key: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

enum KeySource {
    /// Fetch the key set from the provider on every verification. No
    /// caching; the provider sets its own HTTP cache headers.
    Remote {
        client: reqwest::Client,
        jwks_url: String,
    },
    /// Fixed key set, for offline verification.
    Static(JwkSet),
}

/// Verifies bearer tokens issued by the identity provider: RS256 only,
/// key selected by `kid` from the JWKS, audience and issuer enforced.
pub struct TokenVerifier {
    keys: KeySource,
    audience: String,
    issuer: String,
}

impl TokenVerifier {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            keys: KeySource::Remote {
                client: reqwest::Client::new(),
                jwks_url: auth.jwks_url(),
            },
            audience: auth.audience.clone(),
            issuer: auth.issuer(),
        }
    }

    /// Verifier pinned to a fixed key set. Used by the test suite; also
    /// useful for air-gapped deployments where the JWKS is provisioned
    /// out of band.
    pub fn with_key_set(
        keys: JwkSet,
        audience: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            keys: KeySource::Static(keys),
            audience: audience.into(),
            issuer: issuer.into(),
        }
    }

    /// Decode and verify `token`, returning its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header =
            decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token header has no key id".to_string()))?;

        let key_set = self.key_set().await?;
        let jwk = key_set.find(&kid).ok_or_else(|| {
            AuthError::InvalidToken(format!("no signing key matches kid {}", kid))
        })?;
        let decoding_key = jwk.decoding_key()?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(describe_decode_error(e)))?;

        Ok(data.claims)
    }

    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        match &self.keys {
            KeySource::Static(keys) => Ok(keys.clone()),
            KeySource::Remote { client, jwks_url } => {
                let response = client.get(jwks_url).send().await.map_err(|e| {
                    AuthError::KeyLookupFailure(format!("jwks fetch failed: {}", e))
                })?;
                response.json::<JwkSet>().await.map_err(|e| {
                    AuthError::KeyLookupFailure(format!("jwks response malformed: {}", e))
                })
            }
        }
    }
}

fn describe_decode_error(err: jsonwebtoken::errors::Error) -> String {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => "token is expired".to_string(),
        ErrorKind::InvalidSignature => "signature verification failed".to_string(),
        ErrorKind::InvalidAudience => "audience does not match".to_string(),
        ErrorKind::InvalidIssuer => "issuer does not match".to_string(),
        ErrorKind::ImmatureSignature => "token is not yet valid".to_string(),
        _ => err.to_string(),
    }
}

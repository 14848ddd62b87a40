use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod verifier;

pub use verifier::{Jwk, JwkSet, TokenVerifier};

/// Decoded bearer token payload. Request-scoped; never persisted.
///
/// `permissions` is optional at the serde level so its absence can be
/// reported as a distinct failure instead of a generic decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Check that this token grants `permission`.
    pub fn require_permission(&self, permission: &str) -> Result<(), AuthError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AuthError::PermissionsClaimMissing)?;

        if !permissions.iter().any(|p| p == permission) {
            return Err(AuthError::PermissionDenied(permission.to_string()));
        }

        Ok(())
    }
}

/// Authorization guard failures. Every variant carries a stable
/// machine-readable code plus a human description; `Display` renders
/// them as `"<code>: <description>"`, which is what ends up in the
/// error envelope's `message` field.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization_header_missing: authorization header is expected")]
    MissingHeader,

    #[error("invalid_header: authorization header must be a bearer token")]
    MalformedHeader,

    #[error("invalid_token: {0}")]
    InvalidToken(String),

    #[error("jwks_unavailable: {0}")]
    KeyLookupFailure(String),

    #[error("invalid_claims: permissions claim is missing")]
    PermissionsClaimMissing,

    #[error("forbidden: permission {0} is not granted")]
    PermissionDenied(String),
}

impl AuthError {
    /// Stable machine-readable code for this failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader => "invalid_header",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::KeyLookupFailure(_) => "jwks_unavailable",
            AuthError::PermissionsClaimMissing => "invalid_claims",
            AuthError::PermissionDenied(_) => "forbidden",
        }
    }
}

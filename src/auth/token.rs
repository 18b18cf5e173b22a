//! Token issuing and the credential verification chain.
//!
//! Two credential formats are accepted, in order:
//! 1. A signed JWT (HS256) issued by `issue_token` — always tried first.
//! 2. The legacy static token from `ADMIN_TOKEN`, kept so callers that
//!    predate signed tokens keep working without re-authenticating.
//!
//! Verification is a pure function of (credential, current time, config) and
//! holds no state, so it is safe to call from any number of concurrent
//! requests.

use crate::config::Config;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the signed token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Token lifetime: 7 days.
pub const TOKEN_TTL_SECS: i64 = 604_800;

/// Claims carried by a signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Admin role. The API has a single administrative principal, so this only
/// ever holds one value; it exists to keep the identity self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated principal attached to a request after the gate passes.
/// Never persisted; lives for one request only.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: String,
    pub role: Role,
}

/// Why a credential was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No credential was presented at all.
    Unauthenticated,
    /// A credential was presented but failed both the signed-token check
    /// and the legacy-token check.
    InvalidCredential,
}

impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::Unauthenticated => {
                AppError::Unauthorized("Authentication required".to_string())
            }
            AuthRejection::InvalidCredential => AppError::Forbidden("Invalid token".to_string()),
        }
    }
}

/// Issue a signed token for an already-verified admin email.
///
/// The caller must have confirmed the email belongs to the configured admin
/// identity. Expiry is fixed at 7 days from issuance.
pub fn issue_token(email: &str, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))
}

/// Decode and validate a signed token. Expired, malformed and mis-signed
/// tokens all come back as Err — callers cannot tell them apart.
fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Verify an extracted credential against the configured secrets.
///
/// Ordered chain:
/// 1. absent credential — `Unauthenticated`
/// 2. signed token (signature + expiry) — identity from the token's claims
/// 3. legacy static token, when configured — identity from
///    `admin_token_email`
/// 4. anything else — `InvalidCredential`
pub fn verify_credential(
    credential: Option<&str>,
    config: &Config,
) -> Result<AdminIdentity, AuthRejection> {
    let credential = credential.ok_or(AuthRejection::Unauthenticated)?;

    // Signed tokens take priority over the legacy path. A failed decode
    // falls through instead of rejecting so legacy callers still work.
    if let Ok(claims) = decode_claims(credential, &config.jwt_secret) {
        return Ok(AdminIdentity {
            email: claims.email,
            role: Role::Admin,
        });
    }

    if let Some(legacy) = &config.admin_token {
        if credential == legacy {
            return Ok(AdminIdentity {
                email: config.admin_token_email.clone(),
                role: Role::Admin,
            });
        }
    }

    Err(AuthRejection::InvalidCredential)
}

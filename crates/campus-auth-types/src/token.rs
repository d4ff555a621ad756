//! Session JWT issue and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use campus_domain::role::Role;

/// Session-token lifetime in seconds (12 hours).
pub const SESSION_TOKEN_EXP: u64 = 43_200;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_name: String,
    pub role: Role,
    pub expires_at: u64,
}

/// A freshly signed token and its expiry (seconds since UNIX epoch).
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

/// Errors returned by [`validate_session_token`] and the bearer extractor.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | account identifier (user name) |
/// | `role` | custom | [`Role`] wire string |
/// | `iat` | `iat` | issued at, seconds since epoch |
/// | `exp` | `exp` | expiry, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token for `user_name` valid for [`SESSION_TOKEN_EXP`] seconds.
pub fn issue_session_token(
    user_name: &str,
    role: Role,
    secret: &str,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let iat = now_secs();
    let claims = SessionClaims {
        sub: user_name.to_owned(),
        role,
        iat,
        exp: iat + SESSION_TOKEN_EXP,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(IssuedToken {
        token,
        expires_at: claims.exp,
    })
}

/// Validate a session token, returning the identity it carries.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`.
/// Default leeway of 60s applies to expiry.
pub fn validate_session_token(token: &str, secret: &str) -> Result<Session, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    if data.claims.sub.is_empty() {
        return Err(AuthError::Malformed);
    }

    Ok(Session {
        user_name: data.claims.sub,
        role: data.claims.role,
        expires_at: data.claims.exp,
    })
}

//! `Authorization: Bearer <token>` extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;

use crate::token::{AuthError, Session, validate_session_token};

/// HMAC secret used to verify session tokens. Expose it from the router state
/// with `FromRef` so [`Session`] can be extracted.
#[derive(Clone)]
pub struct SessionSecret(Arc<str>);

impl SessionSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidSignature | Self::Malformed => "INVALID_TOKEN",
            Self::Expired => "TOKEN_EXPIRED",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Verified identity of the caller.
///
/// Rejects with 401 if the header is absent, not a bearer credential, badly
/// signed, malformed or expired. Role enforcement (403) is done by handlers.
impl<S> FromRequestParts<S> for Session
where
    SessionSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = SessionSecret::from_ref(state);
        let result = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(AuthError::MissingToken)
            .and_then(|Authorization(bearer)| {
                validate_session_token(bearer.token(), secret.as_str())
            });

        async move { result }
    }
}

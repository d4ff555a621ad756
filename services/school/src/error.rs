use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use campus_domain::pagination::PaginationError;

/// School service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum SchoolServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),
    #[error("missing data")]
    MissingData,
    #[error("class is full")]
    ClassFull,
    #[error("class capacity below current enrollment")]
    CapacityBelowEnrollment,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("forbidden")]
    Forbidden,
    #[error("account not found")]
    AccountNotFound,
    #[error("class not found")]
    ClassNotFound,
    #[error("account already exists")]
    AccountAlreadyExists,
    #[error("admin already exists")]
    AdminAlreadyExists,
    #[error("class already exists")]
    ClassAlreadyExists,
    #[error("class still has enrolled students")]
    ClassNotEmpty,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SchoolServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidPagination(_) => "INVALID_PAGINATION",
            Self::MissingData => "MISSING_DATA",
            Self::ClassFull => "CLASS_FULL",
            Self::CapacityBelowEnrollment => "CAPACITY_BELOW_ENROLLMENT",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::Forbidden => "FORBIDDEN",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::AccountAlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            Self::AdminAlreadyExists => "ADMIN_ALREADY_EXISTS",
            Self::ClassAlreadyExists => "CLASS_ALREADY_EXISTS",
            Self::ClassNotEmpty => "CLASS_NOT_EMPTY",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl IntoResponse for SchoolServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_)
            | Self::InvalidPagination(_)
            | Self::MissingData
            | Self::ClassFull
            | Self::CapacityBelowEnrollment => StatusCode::BAD_REQUEST,
            Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::AccountNotFound | Self::ClassNotFound => StatusCode::NOT_FOUND,
            Self::AccountAlreadyExists
            | Self::AdminAlreadyExists
            | Self::ClassAlreadyExists
            | Self::ClassNotEmpty => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

pub mod account;
pub mod class;
pub mod health;
pub mod report;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use campus_domain::pagination::PageRequest;

use crate::error::SchoolServiceError;

/// Unwrap a JSON body, reporting malformed input as a 400 with the service error shape.
pub(crate) fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, SchoolServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| SchoolServiceError::InvalidInput(rejection.body_text()))
}

/// `?filter=&page=&limit=` shared by every search endpoint. Page values stay
/// raw strings so non-numeric input is reported as invalid pagination.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub filter: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SearchQuery {
    pub(crate) fn page_request(&self) -> Result<PageRequest, SchoolServiceError> {
        Ok(PageRequest::parse(
            self.page.as_deref(),
            self.limit.as_deref(),
        )?)
    }
}

//! Request-level error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::pages::LoadError;

/// Errors surfaced while serving a page.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::Load(LoadError::NotFound(_)) => StatusCode::NOT_FOUND,
            SiteError::Load(LoadError::Timeout(..)) => StatusCode::GATEWAY_TIMEOUT,
            SiteError::Load(_) => StatusCode::BAD_GATEWAY,
            SiteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let body = match &self {
            SiteError::Load(LoadError::NotFound(_)) => "Page not found",
            SiteError::Load(_) => "Failed to load page",
            SiteError::MethodNotAllowed => "Method not allowed",
        };
        (self.status(), body).into_response()
    }
}

//! Request spans.
//!
//! # Responsibilities
//! - Create one span per HTTP request carrying the request ID
//!
//! # Design Decisions
//! - The span is created after the request ID layer runs, so the ID is
//!   always present

use axum::body::Body;
use axum::http::{header, Request};
use tracing::Span;

use crate::http::request::request_id;

/// Span for an incoming request.
pub fn request_span(request: &Request<Body>) -> Span {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        host = %host,
        request_id = %request_id(request.headers()),
    )
}

//! Response construction.
//!
//! # Responsibilities
//! - Render loaded page modules as HTML
//! - Build redirects for legacy and unmatched paths
//!
//! # Design Decisions
//! - Pages are rendered per request and marked `no-cache`; the module cache
//!   lives in the loader, not the browser
//! - Redirects are temporary (307) so route changes take effect immediately

use axum::{
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::pages::PageModule;

/// Render `module` with `props` into an HTML response.
pub fn page_response(module: &PageModule, props: &[(String, String)]) -> Response {
    let props: Vec<(&str, &str)> = props
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(module.render(&props)),
    )
        .into_response()
}

/// Temporary redirect to `to`.
pub fn redirect_response(to: &str) -> Response {
    Redirect::temporary(to).into_response()
}

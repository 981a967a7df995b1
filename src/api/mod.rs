//! JSON status API mounted under `/api`.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_api_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/routes", get(get_routes))
        .route("/session", get(get_session))
}

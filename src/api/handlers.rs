use axum::{extract::State, Json};
use serde::Serialize;

use crate::backend::{CollectionRef, CredentialReport};
use crate::config::schema::{EnvSource, FeatureFlags};
use crate::http::server::AppState;
use crate::routing::RouteEntry;
use crate::session::User;

#[derive(Serialize)]
pub struct SystemStatus {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub env_source: EnvSource,
    pub production_domain: String,
    pub features: FeatureFlags,
    pub backend: CredentialReport,
    pub collections: Vec<CollectionRef>,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub loading: bool,
    pub authenticated: bool,
    pub user: Option<User>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let config = &state.config;
    Json(SystemStatus {
        name: config.app.name.clone(),
        version: config.app.version.clone(),
        environment: config.app.environment.clone(),
        env_source: config.env_source,
        production_domain: config.routing.production_domain.clone(),
        features: config.features.clone(),
        backend: state.backend.report(),
        collections: state.backend.collections().to_vec(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteEntry>> {
    Json(state.router.table().entries().to_vec())
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionStatus> {
    let user = state.session.current();
    Json(SessionStatus {
        loading: state.session.is_loading(),
        authenticated: user.is_some(),
        user,
    })
}

pub async fn health() -> &'static str {
    "ok"
}

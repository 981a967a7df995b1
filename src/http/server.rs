//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, security headers)
//! - Dispatch page requests through the route table
//! - Load page modules lazily and render them
//! - Serve until the shutdown broadcast fires

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::{handlers::health, setup_api_router};
use crate::backend::BackendServices;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::{page_response, redirect_response};
use crate::observability::{metrics, tracing::request_span};
use crate::pages::PageLoader;
use crate::routing::{Dispatch, Router as SiteRouter};
use crate::security::with_security_headers;
use crate::session::SessionHolder;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub router: Arc<SiteRouter>,
    pub pages: Arc<PageLoader>,
    pub session: Arc<SessionHolder>,
    pub backend: Arc<BackendServices>,
}

impl AppState {
    /// Page views are recorded only when the flag is on and the backing
    /// services can take them.
    pub fn analytics_enabled(&self) -> bool {
        self.config.features.analytics && self.backend.analytics_available()
    }
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over prepared state.
    pub fn new(state: AppState) -> Self {
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        let app = Router::new()
            .route("/healthz", get(health))
            .nest("/api", setup_api_router())
            .fallback(site_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        let app = if config.security.enable_headers {
            with_security_headers(app)
        } else {
            app
        };

        app.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// A handle to the assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Page handler.
/// Matches the route table, resolves `/` by host, loads and renders the page.
async fn site_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let path = request.uri().path().to_string();
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().host())
        .map(str::to_string);

    if request.method() != Method::GET && request.method() != Method::HEAD {
        let err = SiteError::MethodNotAllowed;
        metrics::record_request("-", err.status().as_u16(), start_time);
        return err.into_response();
    }

    let dispatch = state.router.dispatch(host.as_deref(), &path);
    tracing::debug!(
        request_id = %request_id,
        host = host.as_deref().unwrap_or("-"),
        path = %path,
        dispatch = ?dispatch,
        "Routing request"
    );

    let (page, props) = match dispatch {
        Dispatch::Redirect { to } => {
            let response = redirect_response(&to);
            metrics::record_request("redirect", response.status().as_u16(), start_time);
            return response;
        }
        Dispatch::Root { page } => {
            metrics::record_root_resolution(page);
            (page, Vec::new())
        }
        Dispatch::Page { page, props } => (page, props),
    };

    match state.pages.load(page).await {
        Ok(module) => {
            if state.analytics_enabled() {
                metrics::record_page_view(page);
            }
            let response = page_response(&module, &props);
            metrics::record_request(page.as_str(), response.status().as_u16(), start_time);
            response
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, page = %page, error = %e, "Router error");
            let err = SiteError::from(e);
            metrics::record_request(page.as_str(), err.status().as_u16(), start_time);
            err.into_response()
        }
    }
}

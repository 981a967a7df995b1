//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start background tasks (session observer, signal handler, metrics)
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast on bind or page source errors
//! - Missing backing-service credentials are logged, never fatal
//! - Listener starts last (traffic only when ready)

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::backend::BackendServices;
use crate::config::schema::PagesConfig;
use crate::config::SiteConfig;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::pages::{FsPageSource, HttpPageSource, PageLoader, PageSource};
use crate::routing::Router as SiteRouter;
use crate::session::{AuthStateSource, SessionHolder, SessionSubscription};

/// Error type for startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid page origin: {0}")]
    PageOrigin(#[from] url::ParseError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Pick the page source: HTTP origin if configured, else the directory.
pub fn page_source(config: &PagesConfig) -> Result<Arc<dyn PageSource>, StartupError> {
    match &config.origin {
        Some(origin) => Ok(Arc::new(HttpPageSource::new(origin)?)),
        None => Ok(Arc::new(FsPageSource::new(&config.dir))),
    }
}

/// Build shared state and start observing `auth`.
pub fn build_state(
    config: SiteConfig,
    auth: &dyn AuthStateSource,
    shutdown: &Shutdown,
) -> Result<(AppState, SessionSubscription), StartupError> {
    let backend = Arc::new(BackendServices::init(config.backend.clone(), config.env_source));
    let router = Arc::new(SiteRouter::from_config(&config.routing));

    let session = Arc::new(SessionHolder::new());
    let subscription = session.observe(auth, shutdown.subscribe());

    let pages = Arc::new(PageLoader::new(
        page_source(&config.pages)?,
        Duration::from_secs(config.timeouts.page_load_secs),
    ));

    let state = AppState {
        config: Arc::new(config),
        router,
        pages,
        session,
        backend,
    };

    Ok((state, subscription))
}

/// Run the site until SIGINT/SIGTERM.
pub async fn run(config: SiteConfig, auth: Arc<dyn AuthStateSource>) -> Result<(), StartupError> {
    tracing::info!(
        name = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        env_source = %config.env_source,
        production_domain = %config.routing.production_domain,
        "Starting site"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let shutdown = Arc::new(Shutdown::new());
    let (state, mut subscription) = build_state(config, auth.as_ref(), &shutdown)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_address.clone(),
            source,
        })?;

    let signals = spawn_signal_handler(shutdown.clone());
    let server = HttpServer::new(state);
    let result = server.run(listener, shutdown.subscribe()).await;

    subscription.cleanup();
    signals.abort();

    result.map_err(StartupError::Serve)
}

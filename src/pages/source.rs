//! Page module sources.
//!
//! # Responsibilities
//! - Fetch a page module's template by `PageId`
//! - Map missing modules to `LoadError::NotFound`
//! - Leave retry and caching to the loader

use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::pages::PageId;

/// Largest page module accepted from an HTTP origin.
const MAX_PAGE_BYTES: usize = 4 * 1024 * 1024;

/// Why a page module could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("page module '{0}' not found")]
    NotFound(PageId),
    #[error("failed to read page module: {0}")]
    Io(String),
    #[error("page origin returned {0}")]
    Status(StatusCode),
    #[error("page origin unreachable: {0}")]
    Upstream(String),
    #[error("page module is not valid UTF-8")]
    InvalidUtf8,
    #[error("loading '{0}' timed out after {1}s")]
    Timeout(PageId, u64),
}

/// Somewhere page modules can be fetched from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, page: PageId) -> Result<String, LoadError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Reads `<dir>/<page>.html`.
#[derive(Debug, Clone)]
pub struct FsPageSource {
    dir: PathBuf,
}

impl FsPageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl PageSource for FsPageSource {
    async fn fetch(&self, page: PageId) -> Result<String, LoadError> {
        let path = self.dir.join(page.file_name());
        match tokio::fs::read(&path).await {
            Ok(bytes) => String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound(page)),
            Err(e) => Err(LoadError::Io(e.to_string())),
        }
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Fetches `<origin>/<page>.html` over HTTP.
#[derive(Clone)]
pub struct HttpPageSource {
    origin: Url,
    client: Client<HttpConnector, Body>,
}

impl HttpPageSource {
    pub fn new(origin: &str) -> Result<Self, url::ParseError> {
        let mut origin = Url::parse(origin)?;
        // join() replaces the last segment unless the base ends in '/'
        if !origin.path().ends_with('/') {
            let path = format!("{}/", origin.path());
            origin.set_path(&path);
        }

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self { origin, client })
    }

    fn module_uri(&self, page: PageId) -> Result<Uri, LoadError> {
        let url = self
            .origin
            .join(&page.file_name())
            .map_err(|e| LoadError::Upstream(e.to_string()))?;
        url.as_str()
            .parse::<Uri>()
            .map_err(|e| LoadError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, page: PageId) -> Result<String, LoadError> {
        let req = Request::get(self.module_uri(page)?)
            .body(Body::empty())
            .map_err(|e| LoadError::Upstream(e.to_string()))?;

        let response = self
            .client
            .request(req)
            .await
            .map_err(|e| LoadError::Upstream(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(page));
        }
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        let bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_PAGE_BYTES)
            .await
            .map_err(|e| LoadError::Upstream(e.to_string()))?;

        String::from_utf8(bytes.to_vec()).map_err(|_| LoadError::InvalidUtf8)
    }

    fn describe(&self) -> String {
        self.origin.to_string()
    }
}

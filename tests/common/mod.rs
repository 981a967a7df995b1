//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;

use site_gateway::config::SiteConfig;
use site_gateway::lifecycle::{build_state, Shutdown};
use site_gateway::pages::PageId;
use site_gateway::session::{ChannelAuthSource, SessionSubscription};
use site_gateway::HttpServer;

/// Write one `<h1>page</h1>` module per page; the public profile shows `userId`.
pub fn write_pages(dir: &Path) {
    for page in PageId::ALL {
        let body = match page {
            PageId::PublicProfile => "<p>{{userId}}</p>".to_string(),
            other => format!("<h1>{}</h1>", other),
        };
        std::fs::write(dir.join(page.file_name()), body).unwrap();
    }
}

/// Config rooted at `pages_dir` with `example.com` as production domain.
pub fn test_config(pages_dir: &Path) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.routing.production_domain = "example.com".into();
    config.pages.dir = pages_dir.display().to_string();
    config.timeouts.page_load_secs = 2;
    config
}

/// A site assembled in-process.
pub struct TestSite {
    pub server: HttpServer,
    pub shutdown: Shutdown,
    pub auth: Arc<ChannelAuthSource>,
    pub subscription: SessionSubscription,
}

pub fn build_site(config: SiteConfig) -> TestSite {
    let shutdown = Shutdown::new();
    let auth = Arc::new(ChannelAuthSource::signed_out());
    let (state, subscription) = build_state(config, auth.as_ref(), &shutdown).unwrap();
    TestSite {
        server: HttpServer::new(state),
        shutdown,
        auth,
        subscription,
    }
}

/// Send a GET for `path` with the given `Host` through the router in-process.
pub async fn get(site: &TestSite, host: &str, path: &str) -> Response<Body> {
    site.server
        .router()
        .oneshot(
            Request::builder()
                .uri(path)
                .header("host", host)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a programmable page origin on an ephemeral port.
///
/// `f` receives the request path and returns status and body.
pub async fn start_programmable_origin<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let (status, body) = f(path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

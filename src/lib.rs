//! Personal multi-section site gateway.
//!
//! Serves the info, social, account, profile and public-profile pages, with
//! the page at `/` chosen from the request's subdomain.
//!
//! # Architecture Overview
//!
//! ```text
//!   Request ──▶ http::server ──▶ routing::router ──▶ routing::table
//!                    │                 │ "/" only
//!                    │                 ▼
//!                    │           routing::resolver (subdomain label → page)
//!                    ▼
//!              pages::loader ──▶ resilience::retries ──▶ pages::source
//!                    │                                   (fs or HTTP origin)
//!                    ▼
//!              http::response ──▶ Client
//!
//!   Cross-cutting: config, backend, session, lifecycle, observability, security
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod resilience;
pub mod routing;
pub mod security;
pub mod session;

pub use config::schema::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

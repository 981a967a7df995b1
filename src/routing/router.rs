//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the route table and subdomain settings
//! - Resolve a (host, path) pair to a page with props, or a redirect
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Host is only consulted for `/`; direct paths ignore it

use std::collections::BTreeMap;

use crate::config::RoutingConfig;
use crate::pages::PageId;
use crate::routing::resolver::{normalize_host, resolve_root_component};
use crate::routing::table::{RouteMatch, RouteTable};

/// Final routing decision for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// `/`, with the page picked from the host.
    Root { page: PageId },
    /// A direct page path with its captured props.
    Page {
        page: PageId,
        props: Vec<(String, String)>,
    },
    Redirect {
        to: String,
    },
}

impl Dispatch {
    /// Page to render, if any.
    pub fn page(&self) -> Option<PageId> {
        match self {
            Dispatch::Root { page } | Dispatch::Page { page, .. } => Some(*page),
            Dispatch::Redirect { .. } => None,
        }
    }
}

/// Subdomain-aware router over a static route table.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    production_domain: String,
    labels: BTreeMap<String, PageId>,
    default_page: PageId,
}

impl Router {
    pub fn from_config(config: &RoutingConfig) -> Self {
        tracing::debug!(
            production_domain = %config.production_domain,
            labels = config.labels.len(),
            default_page = %config.default_page,
            "Compiling routes"
        );
        Self {
            table: RouteTable::standard(),
            production_domain: config.production_domain.clone(),
            labels: config.labels.clone(),
            default_page: config.default_page,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Page mounted at `/` for a raw `Host` header value.
    pub fn root_page(&self, host: Option<&str>) -> PageId {
        let hostname = host.map(normalize_host).unwrap_or_default();
        resolve_root_component(&hostname, &self.production_domain, &self.labels, self.default_page)
    }

    /// Route a request.
    pub fn dispatch(&self, host: Option<&str>, path: &str) -> Dispatch {
        match self.table.match_path(path) {
            RouteMatch::SubdomainRoot => Dispatch::Root {
                page: self.root_page(host),
            },
            RouteMatch::Page { page, params } => Dispatch::Page { page, props: params },
            RouteMatch::Redirect { to } => Dispatch::Redirect { to },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::from_config(&RoutingConfig {
            production_domain: "example.com".into(),
            ..RoutingConfig::default()
        })
    }

    fn root(page: PageId) -> Dispatch {
        Dispatch::Root { page }
    }

    #[test]
    fn test_root_follows_host() {
        let router = router();
        assert_eq!(router.dispatch(Some("social.example.com"), "/"), root(PageId::Social));
        assert_eq!(router.dispatch(Some("manage.example.com:443"), "/"), root(PageId::Account));
        assert_eq!(router.dispatch(Some("localhost:3000"), "/"), root(PageId::Info));
        assert_eq!(router.dispatch(None, "/"), root(PageId::Info));
    }

    #[test]
    fn test_host_header_case_is_ignored() {
        let router = router();
        assert_eq!(router.root_page(Some("SOCIAL.Example.com:8080")), PageId::Social);
        assert_eq!(router.root_page(Some("Users.EXAMPLE.COM")), PageId::Profile);
    }

    #[test]
    fn test_direct_paths_ignore_host() {
        let router = router();
        assert_eq!(
            router.dispatch(Some("social.example.com"), "/account"),
            Dispatch::Page { page: PageId::Account, props: vec![] }
        );
        assert_eq!(
            router.dispatch(Some("localhost"), "/user/42"),
            Dispatch::Page {
                page: PageId::PublicProfile,
                props: vec![("userId".into(), "42".into())],
            }
        );
    }

    #[test]
    fn test_unmatched_redirects_to_root() {
        assert_eq!(
            router().dispatch(Some("social.example.com"), "/missing"),
            Dispatch::Redirect { to: "/".into() }
        );
    }
}

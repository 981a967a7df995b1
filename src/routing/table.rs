//! Static route table.
//!
//! Built once at startup; every page is reachable by a direct path regardless
//! of subdomain. Entries are checked in order and the catch-all is last, so
//! every path matches something.

use serde::Serialize;

use crate::pages::PageId;
use crate::routing::matcher::{PathPattern, Params};

/// What an entry serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteTarget {
    /// Page picked from the request host.
    SubdomainRoot,
    /// A fixed page. Captured parameters are passed as props unchanged.
    Page { page: PageId },
    /// Send the client elsewhere.
    Redirect { to: String },
}

/// One row of the route table.
#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    pub name: &'static str,
    pub path: String,
    pub target: RouteTarget,
    /// Extra paths serving the same target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Legacy paths that redirect to `path`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<String>,
    #[serde(skip)]
    pattern: PathPattern,
}

impl RouteEntry {
    pub fn new(name: &'static str, path: &str, target: RouteTarget) -> Self {
        Self {
            name,
            path: path.to_string(),
            target,
            aliases: Vec::new(),
            redirects: Vec::new(),
            pattern: PathPattern::parse(path),
        }
    }

    pub fn alias(mut self, path: &str) -> Self {
        self.aliases.push(path.to_string());
        self
    }

    pub fn redirect_from(mut self, path: &str) -> Self {
        self.redirects.push(path.to_string());
        self
    }
}

/// Result of matching a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    SubdomainRoot,
    Page { page: PageId, params: Params },
    Redirect { to: String },
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// The site's route table.
    pub fn standard() -> Self {
        let entries = vec![
            RouteEntry::new("Root", "/", RouteTarget::SubdomainRoot),
            RouteEntry::new("AppInfo", "/info", RouteTarget::Page { page: PageId::Info }),
            RouteEntry::new("AppSocial", "/social", RouteTarget::Page { page: PageId::Social }),
            RouteEntry::new("AppAccManagement", "/account", RouteTarget::Page { page: PageId::Account })
                .redirect_from("/login"),
            RouteEntry::new("AppProfile", "/profile", RouteTarget::Page { page: PageId::Profile })
                .alias("/profiles"),
            RouteEntry::new(
                "UserProfile",
                "/user/:userId",
                RouteTarget::Page { page: PageId::PublicProfile },
            ),
            RouteEntry::new("CatchAll", "/*", RouteTarget::Redirect { to: "/".to_string() }),
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Match `path` against the table. First match wins.
    pub fn match_path(&self, path: &str) -> RouteMatch {
        for entry in &self.entries {
            if entry.redirects.iter().any(|r| PathPattern::parse(r).matches(path).is_some()) {
                return RouteMatch::Redirect { to: entry.path.clone() };
            }

            let params = entry.pattern.matches(path).or_else(|| {
                entry
                    .aliases
                    .iter()
                    .find_map(|a| PathPattern::parse(a).matches(path))
            });

            if let Some(params) = params {
                return match &entry.target {
                    RouteTarget::SubdomainRoot => RouteMatch::SubdomainRoot,
                    RouteTarget::Page { page } => RouteMatch::Page { page: *page, params },
                    RouteTarget::Redirect { to } => RouteMatch::Redirect { to: to.clone() },
                };
            }
        }

        RouteMatch::Redirect { to: "/".to_string() }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

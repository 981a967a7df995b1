//! Path matching logic.
//!
//! # Responsibilities
//! - Match exact paths (with optional aliases)
//! - Match single-segment parameters (`/user/:userId`)
//! - Match everything (catch-all)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A trailing slash on a non-root path is ignored
//! - No regex to guarantee O(n) matching

use serde::Serialize;

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathPattern {
    /// Exactly this path.
    Exact { path: String },
    /// `<prefix>/:<param>` with one non-empty segment.
    Param { prefix: String, param: String },
    /// Any path.
    CatchAll,
}

/// Parameters captured by a match.
pub type Params = Vec<(String, String)>;

impl PathPattern {
    /// Compile a route path. `:name` as the last segment becomes a parameter,
    /// `*` matches everything.
    pub fn parse(path: &str) -> Self {
        if path == "*" || path == "/*" {
            return PathPattern::CatchAll;
        }
        if let Some((prefix, last)) = path.rsplit_once('/') {
            if let Some(param) = last.strip_prefix(':') {
                return PathPattern::Param {
                    prefix: prefix.to_string(),
                    param: param.to_string(),
                };
            }
        }
        PathPattern::Exact {
            path: path.to_string(),
        }
    }

    /// Match `path`, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = normalize(path);
        match self {
            PathPattern::Exact { path: expected } => (path == expected).then(Vec::new),
            PathPattern::Param { prefix, param } => {
                let rest = path.strip_prefix(prefix.as_str())?.strip_prefix('/')?;
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                Some(vec![(param.clone(), rest.to_string())])
            }
            PathPattern::CatchAll => Some(Vec::new()),
        }
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

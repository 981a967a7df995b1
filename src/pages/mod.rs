//! Page modules and lazy loading.
//!
//! # Data Flow
//! ```text
//! PageId (from route table)
//!     → loader.rs (cache hit? return)
//!     → resilience::retries (attempt, retry once, fail)
//!     → source.rs (filesystem or HTTP origin fetch)
//!     → PageModule (cached for process lifetime)
//!     → render(props) → HTML
//! ```
//!
//! # Design Decisions
//! - Pages are fetched on first use, not at startup
//! - Successful loads are cached; failures never are
//! - Templates only support `{{name}}` substitution with HTML escaping

pub mod loader;
pub mod source;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use loader::PageLoader;
pub use source::{FsPageSource, HttpPageSource, LoadError, PageSource};

/// A mountable page module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    Info,
    Social,
    Account,
    Profile,
    PublicProfile,
}

impl PageId {
    /// Every page, in route table order.
    pub const ALL: [PageId; 5] = [
        PageId::Info,
        PageId::Social,
        PageId::Account,
        PageId::Profile,
        PageId::PublicProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Info => "info",
            PageId::Social => "social",
            PageId::Account => "account",
            PageId::Profile => "profile",
            PageId::PublicProfile => "public-profile",
        }
    }

    /// File name of the module under the page source.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown page '{}'", s))
    }
}

/// A loaded page template.
#[derive(Debug, Clone)]
pub struct PageModule {
    page: PageId,
    template: Arc<str>,
}

impl PageModule {
    pub fn new(page: PageId, template: impl Into<Arc<str>>) -> Self {
        Self {
            page,
            template: template.into(),
        }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Render the template, replacing `{{name}}` with the escaped prop value.
    ///
    /// Placeholders without a matching prop are left untouched.
    pub fn render(&self, props: &[(&str, &str)]) -> String {
        let template = &*self.template;
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let key = after[..end].trim();
            match props.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => out.push_str(&escape_html(value)),
                None => out.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

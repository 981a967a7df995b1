//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files;
//! environment values are layered on top by `loader.rs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pages::PageId;

/// Literal production domain used when none is configured.
pub const DEFAULT_PRODUCTION_DOMAIN: &str = "srgunturkun.com";

/// Root configuration for the site gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Subdomain routing settings.
    pub routing: RoutingConfig,

    /// Where page modules are loaded from.
    pub pages: PagesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Application identity (name, version, environment).
    pub app: AppInfo,

    /// Feature flags.
    pub features: FeatureFlags,

    /// Contact details shown on the info page.
    pub contact: ContactConfig,

    /// Backing-service credentials.
    pub backend: BackendServiceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,

    /// Which environment prefix supplied values. Informational only.
    #[serde(skip)]
    pub env_source: EnvSource,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Subdomain routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Domain suffix identifying the live deployment.
    pub production_domain: String,

    /// Subdomain label → page. Labels match exactly and case-sensitively.
    pub labels: BTreeMap<String, PageId>,

    /// Page mounted at `/` off the production domain or for unknown labels.
    pub default_page: PageId,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        let labels = [
            ("social", PageId::Social),
            ("account", PageId::Account),
            ("manage", PageId::Account),
            ("profiles", PageId::Profile),
            ("users", PageId::Profile),
            ("www", PageId::Info),
        ]
        .into_iter()
        .map(|(label, page)| (label.to_string(), page))
        .collect();

        Self {
            production_domain: DEFAULT_PRODUCTION_DOMAIN.to_string(),
            labels,
            default_page: PageId::Info,
        }
    }
}

/// Page module source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Directory holding `<page>.html` files.
    pub dir: String,

    /// Optional HTTP origin to fetch page modules from instead of `dir`.
    pub origin: Option<String>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: "pages".to_string(),
            origin: None,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Upper bound for a single page load attempt in seconds.
    pub page_load_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            page_load_secs: 10,
        }
    }
}

/// Application identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    /// Deployment environment ("development", "production", ...).
    pub environment: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "Personal Web Application".to_string(),
            version: "0.1.0".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppInfo {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Feature flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Count page views.
    pub analytics: bool,
    /// Force debug-level logging.
    pub debug: bool,
    pub social_login: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            analytics: true,
            debug: false,
            social_login: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContactConfig {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Credentials for the hosted backing service (auth, documents, analytics).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BackendServiceConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    /// Optional; only needed for analytics.
    pub measurement_id: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}

/// Environment prefix family detected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvSource {
    /// At least one `VITE_` key was set.
    Vite,
    /// No `VITE_` keys, at least one `VUE_APP_` key.
    VueCli,
    #[default]
    Unset,
}

impl std::fmt::Display for EnvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvSource::Vite => write!(f, "vite"),
            EnvSource::VueCli => write!(f, "vue-cli"),
            EnvSource::Unset => write!(f, "unset"),
        }
    }
}

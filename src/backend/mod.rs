//! Backing-service handles.
//!
//! Holds the hosted service's credentials and the named document collections
//! the site uses. Missing credentials are reported once at startup and never
//! stop the process.

use serde::Serialize;

use crate::config::schema::{BackendServiceConfig, EnvSource};

/// Collections the site reads and writes.
pub const COLLECTION_NAMES: [&str; 5] = ["users", "posts", "comments", "profiles", "games"];

/// Reference to a document collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionRef {
    pub name: &'static str,
    pub path: String,
}

impl CollectionRef {
    fn new(project_id: &str, name: &'static str) -> Self {
        Self {
            name,
            path: format!("projects/{}/databases/(default)/documents/{}", project_id, name),
        }
    }
}

/// Presence of each required credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialReport {
    pub api_key: bool,
    pub auth_domain: bool,
    pub project_id: bool,
    pub storage_bucket: bool,
    pub messaging_sender_id: bool,
    pub app_id: bool,
}

impl CredentialReport {
    pub fn for_config(config: &BackendServiceConfig) -> Self {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        Self {
            api_key: present(&config.api_key),
            auth_domain: present(&config.auth_domain),
            project_id: present(&config.project_id),
            storage_bucket: present(&config.storage_bucket),
            messaging_sender_id: present(&config.messaging_sender_id),
            app_id: present(&config.app_id),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.api_key
            && self.auth_domain
            && self.project_id
            && self.storage_bucket
            && self.messaging_sender_id
            && self.app_id
    }
}

/// Credentials plus collection references, built once at startup.
#[derive(Debug, Clone)]
pub struct BackendServices {
    config: BackendServiceConfig,
    report: CredentialReport,
    collections: Vec<CollectionRef>,
}

impl BackendServices {
    /// Build handles and log whether the credentials are complete.
    pub fn init(config: BackendServiceConfig, env_source: EnvSource) -> Self {
        let report = CredentialReport::for_config(&config);

        if report.is_complete() {
            tracing::info!(env_source = %env_source, "Backing-service configuration loaded");
        } else {
            tracing::error!(
                env_source = %env_source,
                api_key = report.api_key,
                auth_domain = report.auth_domain,
                project_id = report.project_id,
                storage_bucket = report.storage_bucket,
                messaging_sender_id = report.messaging_sender_id,
                app_id = report.app_id,
                "Missing backing-service configuration values; check your .env file"
            );
        }

        let project = config.project_id.as_deref().unwrap_or_default();
        let collections = COLLECTION_NAMES
            .iter()
            .map(|&name| CollectionRef::new(project, name))
            .collect();

        Self {
            config,
            report,
            collections,
        }
    }

    pub fn report(&self) -> CredentialReport {
        self.report
    }

    pub fn collections(&self) -> &[CollectionRef] {
        &self.collections
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionRef> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Analytics needs a measurement id on top of the base credentials.
    pub fn analytics_available(&self) -> bool {
        self.report.is_complete()
            && self
                .config
                .measurement_id
                .as_deref()
                .is_some_and(|id| !id.is_empty())
    }
}

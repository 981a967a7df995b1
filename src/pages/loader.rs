//! Lazy page loader with retry-once semantics.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::pages::{LoadError, PageId, PageModule, PageSource};
use crate::resilience::retry_once;

/// Loads page modules on demand and keeps successful loads.
///
/// Concurrent first loads of the same page are not coalesced; each caller
/// runs its own attempt/retry sequence and the last success wins the cache
/// slot.
pub struct PageLoader {
    source: Arc<dyn PageSource>,
    cache: DashMap<PageId, PageModule>,
    attempt_timeout: Duration,
}

impl PageLoader {
    pub fn new(source: Arc<dyn PageSource>, attempt_timeout: Duration) -> Self {
        tracing::info!(
            source = %source.describe(),
            timeout_secs = attempt_timeout.as_secs(),
            "Page loader ready"
        );
        Self {
            source,
            cache: DashMap::new(),
            attempt_timeout,
        }
    }

    /// Load `page`, retrying once on failure.
    pub async fn load(&self, page: PageId) -> Result<PageModule, LoadError> {
        if let Some(module) = self.cache.get(&page) {
            return Ok(module.value().clone());
        }

        let timeout = self.attempt_timeout;
        let result = retry_once(
            |attempt| {
                let source = self.source.clone();
                async move {
                    tracing::debug!(page = %page, attempt, "Loading page module");
                    match tokio::time::timeout(timeout, source.fetch(page)).await {
                        Ok(result) => result,
                        Err(_) => Err(LoadError::Timeout(page, timeout.as_secs())),
                    }
                }
            },
            |err| {
                tracing::error!(page = %page, error = %err, "Failed to load page module, retrying once");
                metrics::record_page_load(page, "retry");
            },
        )
        .await;

        match result {
            Ok(template) => {
                let module = PageModule::new(page, template);
                self.cache.insert(page, module.clone());
                metrics::record_page_load(page, "ok");
                Ok(module)
            }
            Err(e) => {
                metrics::record_page_load(page, "failed");
                Err(e)
            }
        }
    }

    /// Whether `page` is already cached.
    pub fn is_loaded(&self, page: PageId) -> bool {
        self.cache.contains_key(&page)
    }
}

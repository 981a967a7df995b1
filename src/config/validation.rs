//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject subdomain labels that can never match
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Missing backing-service credentials are reported by `backend`, not here

use std::net::SocketAddr;

use crate::config::schema::SiteConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),
    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("routing label '{0}' must be non-empty and contain no '.'")]
    Label(String),
    #[error("pages.dir must be set when pages.origin is absent")]
    NoPageSource,
    #[error("pages.origin '{0}' is not an http(s) URL")]
    Origin(String),
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.page_load_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("page_load_secs"));
    }

    for label in config.routing.labels.keys() {
        if label.is_empty() || label.contains('.') {
            errors.push(ValidationError::Label(label.clone()));
        }
    }

    match &config.pages.origin {
        Some(origin) => match url::Url::parse(origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::Origin(origin.clone())),
        },
        None if config.pages.dir.trim().is_empty() => errors.push(ValidationError::NoPageSource),
        None => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageId;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SiteConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.page_load_secs = 0;
        config.routing.labels.insert("a.b".into(), PageId::Social);
        config.routing.labels.insert(String::new(), PageId::Social);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout("page_load_secs")));
        assert!(errors.contains(&ValidationError::Label("a.b".into())));
    }

    #[test]
    fn test_origin_must_be_http() {
        let mut config = SiteConfig::default();
        config.pages.origin = Some("ftp://assets.example".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::Origin("ftp://assets.example".into())]
        );

        config.pages.origin = Some("http://127.0.0.1:5173".into());
        config.pages.dir = String::new();
        assert!(validate_config(&config).is_ok());
    }
}

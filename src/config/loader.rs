//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::env::{detect_env_source, env_flag, env_value, env_value_non_empty, EnvLookup};
use crate::config::schema::{SiteConfig, DEFAULT_PRODUCTION_DOMAIN};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without environment overlay.
pub fn read_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration: defaults, then `path` if given, then the environment.
///
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>, env: &impl EnvLookup) -> Result<SiteConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => SiteConfig::default(),
    };

    apply_env(&mut config, env);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// Only keys that are present override; absent keys keep the file or default
/// value. The production domain and backing-service credentials skip empty
/// values, so an empty `VITE_` key falls through to `VUE_APP_`.
pub fn apply_env(config: &mut SiteConfig, env: &impl EnvLookup) {
    config.env_source = detect_env_source(env);

    set_if_present(
        &mut config.routing.production_domain,
        env_value_non_empty(env, "PRODUCTION_DOMAIN"),
    );
    config.routing.production_domain =
        production_domain_or_default(&config.routing.production_domain).to_string();

    let backend = &mut config.backend;
    overlay(&mut backend.api_key, env_value_non_empty(env, "FIREBASE_API_KEY"));
    overlay(&mut backend.auth_domain, env_value_non_empty(env, "FIREBASE_AUTH_DOMAIN"));
    overlay(&mut backend.project_id, env_value_non_empty(env, "FIREBASE_PROJECT_ID"));
    overlay(&mut backend.storage_bucket, env_value_non_empty(env, "FIREBASE_STORAGE_BUCKET"));
    overlay(
        &mut backend.messaging_sender_id,
        env_value_non_empty(env, "FIREBASE_MESSAGING_SENDER_ID"),
    );
    overlay(&mut backend.app_id, env_value_non_empty(env, "FIREBASE_APP_ID"));
    overlay(&mut backend.measurement_id, env_value_non_empty(env, "FIREBASE_MEASUREMENT_ID"));

    set_if_present(&mut config.app.name, env_value(env, "APP_NAME"));
    set_if_present(&mut config.app.version, env_value(env, "APP_VERSION"));
    set_if_present(&mut config.app.environment, env_value(env, "NODE_ENV"));

    let features = &mut config.features;
    features.analytics = env_flag(env, "ENABLE_ANALYTICS", features.analytics);
    features.debug = env_flag(env, "ENABLE_DEBUG", features.debug);
    features.social_login = env_flag(env, "ENABLE_SOCIAL_LOGIN", features.social_login);

    overlay(&mut config.contact.email, env_value(env, "CONTACT_EMAIL"));
    overlay(&mut config.contact.phone, env_value(env, "CONTACT_PHONE"));
    overlay(&mut config.contact.address, env_value(env, "CONTACT_ADDRESS"));
}

/// `domain`, or the built-in production domain when it is blank.
pub fn production_domain_or_default(domain: &str) -> &str {
    if domain.trim().is_empty() {
        DEFAULT_PRODUCTION_DOMAIN
    } else {
        domain
    }
}

fn set_if_present(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn overlay(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EnvSource;
    use crate::pages::PageId;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = load_config(None, &HashMap::new()).unwrap();
        assert_eq!(config.routing.production_domain, DEFAULT_PRODUCTION_DOMAIN);
        assert_eq!(config.app.name, "Personal Web Application");
        assert_eq!(config.app.version, "0.1.0");
        assert!(config.app.is_development());
        assert!(!config.app.is_production());
        assert!(config.features.analytics);
        assert!(!config.features.debug);
        assert_eq!(config.env_source, EnvSource::Unset);
        assert!(config.backend.api_key.is_none());
    }

    #[test]
    fn test_env_overlay() {
        let env = env(&[
            ("VITE_PRODUCTION_DOMAIN", "example.com"),
            ("VITE_FIREBASE_PROJECT_ID", "demo-project"),
            ("VUE_APP_NODE_ENV", "production"),
            ("VITE_ENABLE_ANALYTICS", "false"),
            ("VITE_CONTACT_EMAIL", "me@example.com"),
        ]);
        let config = load_config(None, &env).unwrap();
        assert_eq!(config.routing.production_domain, "example.com");
        assert_eq!(config.backend.project_id.as_deref(), Some("demo-project"));
        assert!(config.app.is_production());
        assert!(!config.features.analytics);
        assert_eq!(config.contact.email.as_deref(), Some("me@example.com"));
        assert_eq!(config.env_source, EnvSource::Vite);
    }

    #[test]
    fn test_empty_domain_falls_back_to_literal() {
        let env = env(&[("VITE_PRODUCTION_DOMAIN", "")]);
        let config = load_config(None, &env).unwrap();
        assert_eq!(config.routing.production_domain, DEFAULT_PRODUCTION_DOMAIN);
    }

    #[test]
    fn test_empty_vite_domain_falls_through_to_vue_app() {
        let env = env(&[
            ("VITE_PRODUCTION_DOMAIN", ""),
            ("VUE_APP_PRODUCTION_DOMAIN", "example.com"),
        ]);
        let config = load_config(None, &env).unwrap();
        assert_eq!(config.routing.production_domain, "example.com");
    }

    #[test]
    fn test_empty_vite_credential_falls_through_to_vue_app() {
        let env = env(&[
            ("VITE_FIREBASE_API_KEY", ""),
            ("VUE_APP_FIREBASE_API_KEY", "k"),
            ("VITE_FIREBASE_APP_ID", ""),
        ]);
        let config = load_config(None, &env).unwrap();
        assert_eq!(config.backend.api_key.as_deref(), Some("k"));
        assert_eq!(config.backend.app_id, None);
    }

    #[test]
    fn test_empty_app_name_is_taken_as_is() {
        let env = env(&[("VITE_APP_NAME", ""), ("VUE_APP_APP_NAME", "Home")]);
        let config = load_config(None, &env).unwrap();
        assert_eq!(config.app.name, "");
    }

    #[test]
    fn test_blank_domain_is_replaced() {
        assert_eq!(production_domain_or_default(""), DEFAULT_PRODUCTION_DOMAIN);
        assert_eq!(production_domain_or_default("  "), DEFAULT_PRODUCTION_DOMAIN);
        assert_eq!(production_domain_or_default("example.com"), "example.com");
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[listener]
bind_address = "127.0.0.1:4000"

[routing]
production_domain = "file.example"
default_page = "social"

[routing.labels]
signup = "account"
login = "account"
profile = "profile"
"#
        )
        .unwrap();

        let env = env(&[("VUE_APP_PRODUCTION_DOMAIN", "env.example")]);
        let config = load_config(Some(file.path()), &env).unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.routing.production_domain, "env.example");
        assert_eq!(config.routing.default_page, PageId::Social);
        assert_eq!(config.routing.labels.get("signup"), Some(&PageId::Account));
        assert_eq!(config.routing.labels.len(), 3);
        assert_eq!(config.env_source, EnvSource::VueCli);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"not an address\"").unwrap();

        let err = load_config(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("bind_address"));
    }
}

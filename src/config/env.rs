//! Dual-prefix environment lookup.
//!
//! Every key is looked up as `VITE_<KEY>` first and `VUE_APP_<KEY>` second,
//! so deployments built for either tool keep working with the same names.

use std::collections::HashMap;

use crate::config::schema::EnvSource;

/// Prefixes tried, in order.
pub const ENV_PREFIXES: [EnvPrefix; 2] = [EnvPrefix::Vite, EnvPrefix::VueApp];

/// A single environment prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPrefix {
    Vite,
    VueApp,
}

impl EnvPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvPrefix::Vite => "VITE_",
            EnvPrefix::VueApp => "VUE_APP_",
        }
    }
}

/// Read-only view of an environment.
pub trait EnvLookup {
    /// Raw lookup of a fully-qualified variable name.
    fn var(&self, name: &str) -> Option<String>;

    /// Names of all variables present.
    fn names(&self) -> Vec<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn names(&self) -> Vec<String> {
        std::env::vars_os()
            .filter_map(|(k, _)| k.into_string().ok())
            .collect()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// Look up `key` under each prefix in turn.
///
/// Returns the value together with the prefix that supplied it.
pub fn get_env_var(env: &impl EnvLookup, key: &str) -> Option<(String, EnvPrefix)> {
    ENV_PREFIXES.iter().find_map(|prefix| {
        env.var(&format!("{}{}", prefix.as_str(), key))
            .map(|value| (value, *prefix))
    })
}

/// Like [`get_env_var`] but drops the prefix.
pub fn env_value(env: &impl EnvLookup, key: &str) -> Option<String> {
    get_env_var(env, key).map(|(value, _)| value)
}

/// First non-empty value of `key` across the prefixes.
///
/// An empty `VITE_` value falls through to `VUE_APP_`. Used for the
/// production domain and backing-service credentials.
pub fn env_value_non_empty(env: &impl EnvLookup, key: &str) -> Option<String> {
    ENV_PREFIXES
        .iter()
        .filter_map(|prefix| env.var(&format!("{}{}", prefix.as_str(), key)))
        .find(|value| !value.is_empty())
}

/// Boolean flag: true only for the literal string `true`.
pub fn env_flag(env: &impl EnvLookup, key: &str, default: bool) -> bool {
    match env_value(env, key) {
        Some(value) => value == "true",
        None => default,
    }
}

/// Which prefix family the environment was populated for.
pub fn detect_env_source(env: &impl EnvLookup) -> EnvSource {
    let names = env.names();
    if names.iter().any(|n| n.starts_with(EnvPrefix::Vite.as_str())) {
        EnvSource::Vite
    } else if names.iter().any(|n| n.starts_with(EnvPrefix::VueApp.as_str())) {
        EnvSource::VueCli
    } else {
        EnvSource::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_vite_prefix_wins() {
        let env = env(&[
            ("VITE_PRODUCTION_DOMAIN", "a.example"),
            ("VUE_APP_PRODUCTION_DOMAIN", "b.example"),
        ]);
        assert_eq!(
            get_env_var(&env, "PRODUCTION_DOMAIN"),
            Some(("a.example".to_string(), EnvPrefix::Vite))
        );
    }

    #[test]
    fn test_falls_back_to_vue_app() {
        let env = env(&[("VUE_APP_APP_NAME", "Home")]);
        assert_eq!(
            get_env_var(&env, "APP_NAME"),
            Some(("Home".to_string(), EnvPrefix::VueApp))
        );
        assert_eq!(env_value(&env, "APP_VERSION"), None);
    }

    #[test]
    fn test_empty_vite_value_is_kept_by_plain_lookup() {
        let env = env(&[("VITE_APP_NAME", ""), ("VUE_APP_APP_NAME", "Home")]);
        assert_eq!(env_value(&env, "APP_NAME"), Some(String::new()));
    }

    #[test]
    fn test_non_empty_lookup_skips_empty_values() {
        let env = env(&[
            ("VITE_PRODUCTION_DOMAIN", ""),
            ("VUE_APP_PRODUCTION_DOMAIN", "example.com"),
            ("VITE_FIREBASE_APP_ID", ""),
        ]);
        assert_eq!(
            env_value_non_empty(&env, "PRODUCTION_DOMAIN").as_deref(),
            Some("example.com")
        );
        assert_eq!(env_value_non_empty(&env, "FIREBASE_APP_ID"), None);
    }

    #[test]
    fn test_flags_require_literal_true() {
        let env = env(&[
            ("VITE_ENABLE_DEBUG", "true"),
            ("VITE_ENABLE_ANALYTICS", "1"),
        ]);
        assert!(env_flag(&env, "ENABLE_DEBUG", false));
        assert!(!env_flag(&env, "ENABLE_ANALYTICS", true));
        assert!(env_flag(&env, "ENABLE_SOCIAL_LOGIN", true));
    }

    #[test]
    fn test_detect_source() {
        assert_eq!(detect_env_source(&env(&[("VITE_X", "1")])), EnvSource::Vite);
        assert_eq!(
            detect_env_source(&env(&[("VUE_APP_X", "1")])),
            EnvSource::VueCli
        );
        assert_eq!(detect_env_source(&env(&[("PATH", "/bin")])), EnvSource::Unset);
    }
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! SiteConfig::default()
//!     → loader.rs (optional TOML file)
//!     → env.rs (VITE_* then VUE_APP_* overlay, .env via dotenvy)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Callers never see which env prefix supplied a value

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{EnvLookup, ProcessEnv};
pub use loader::{load_config, production_domain_or_default, ConfigError};
pub use schema::BackendServiceConfig;
pub use schema::RoutingConfig;
pub use schema::SiteConfig;

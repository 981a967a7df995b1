//! Security subsystem.
//!
//! Response hardening only; the site has no authenticated routes of its own.

pub mod headers;

pub use headers::with_security_headers;

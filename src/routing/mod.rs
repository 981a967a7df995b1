//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → router.rs (dispatch)
//!     → table.rs (ordered route lookup)
//!     → matcher.rs (evaluate path patterns)
//!     → "/" only: resolver.rs (subdomain label → page)
//!     → Return: page + props, or redirect
//!
//! Route Compilation (at startup):
//!     RoutingConfig
//!     → Static table (root, one entry per page, user profile, catch-all)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod matcher;
pub mod resolver;
pub mod router;
pub mod table;

pub use resolver::{resolve_root_component, subdomain_label};
pub use router::{Dispatch, Router};
pub use table::{RouteEntry, RouteTable, RouteTarget};

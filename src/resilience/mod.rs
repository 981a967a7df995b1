//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Page module load:
//!     → tokio timeout (per attempt, `timeouts.page_load_secs`)
//!     → On failure: retries.rs (retry exactly once, then surface the error)
//! ```
//!
//! # Design Decisions
//! - Every external fetch has a deadline
//! - No backoff, no circuit breaker: one retry is the whole policy

pub mod retries;

pub use retries::{retry_once, RetryOnce, RetryState};

//! Retry-once policy.
//!
//! # States
//! ```text
//! Attempt → (failure) → Retry → (failure) → Fail
//!     ↓ success            ↓ success
//!     Ok                   Ok
//! ```
//!
//! # Design Decisions
//! - Exactly one retry, issued immediately (no backoff)
//! - The second failure is returned to the caller unchanged
//! - No shared state: each call owns its own policy

use std::future::Future;

/// Where a retry-once policy currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// First attempt pending or in flight.
    Attempt,
    /// First attempt failed; the single retry is allowed.
    Retry,
    /// Both attempts failed.
    Fail,
}

/// Two-attempt policy: try, retry once, give up.
#[derive(Debug, Clone)]
pub struct RetryOnce {
    state: RetryState,
}

impl RetryOnce {
    pub fn new() -> Self {
        Self {
            state: RetryState::Attempt,
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    /// Record a failed attempt. Returns true if another attempt may be made.
    pub fn record_failure(&mut self) -> bool {
        match self.state {
            RetryState::Attempt => {
                self.state = RetryState::Retry;
                true
            }
            RetryState::Retry | RetryState::Fail => {
                self.state = RetryState::Fail;
                false
            }
        }
    }
}

impl Default for RetryOnce {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `op` and retry it once on failure.
///
/// `op` receives the 1-based attempt number. `on_retry` is called with the
/// first error before the retry is issued.
pub async fn retry_once<T, E, F, Fut>(mut op: F, mut on_retry: impl FnMut(&E)) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut policy = RetryOnce::new();
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !policy.record_failure() {
                    return Err(e);
                }
                on_retry(&e);
            }
        }
    }
}

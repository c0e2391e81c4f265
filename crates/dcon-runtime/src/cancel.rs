#![forbid(unsafe_code)]

//! Cooperative cancellation for the blink task.
//!
//! A [`CancelSource`] is the control side; [`CancelToken`]s are handed to
//! the task. The token's [`wait_timeout`](CancelToken::wait_timeout) doubles
//! as the blink sleep: it blocks for the interval but wakes immediately when
//! the source fires, which is what makes focus-loss cancellation synchronous
//! instead of waiting out the current half-second.

use std::sync::{Arc, Condvar, Mutex};
use web_time::{Duration, Instant};

struct Shared {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// The control handle that fires cancellation.
///
/// Dropping the source does **not** cancel outstanding tokens; cancellation
/// is always an explicit [`cancel`](Self::cancel) call.
pub struct CancelSource {
    shared: Arc<Shared>,
}

/// A cloneable flag a task polls or sleeps on.
#[derive(Clone)]
pub struct CancelToken {
    shared: Arc<Shared>,
}

impl CancelSource {
    /// Create a source with an untripped token.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                cancelled: Mutex::new(false),
                wake: Condvar::new(),
            }),
        }
    }

    /// A token observing this source.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Trip the flag and wake every sleeping token.
    pub fn cancel(&self) {
        let mut cancelled = self
            .shared
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *cancelled = true;
        self.shared.wake.notify_all();
    }

    /// Whether the flag has been tripped.
    pub fn is_cancelled(&self) -> bool {
        *self
            .shared
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self
            .shared
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep for `duration` or until cancelled, whichever comes first.
    ///
    /// Returns `true` when woken by cancellation, `false` on timeout.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut cancelled = self
            .shared
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        while !*cancelled {
            let now = Instant::now();
            let Some(remaining) = deadline.checked_duration_since(now).filter(|d| !d.is_zero())
            else {
                return false;
            };
            let (guard, _timeout) = self
                .shared
                .wake
                .wait_timeout(cancelled, remaining)
                .unwrap_or_else(|e| e.into_inner());
            cancelled = guard;
        }
        true
    }
}

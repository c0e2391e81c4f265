#![forbid(unsafe_code)]

//! The caret blink task.
//!
//! One blink loop per focus session: [`BlinkTask::restart`] bumps a
//! generation counter, trips the previous generation's token, and spawns a
//! fresh loop, so a stale loop from a superseded focus session terminates
//! deterministically instead of racing the new one on the focus flag.
//!
//! The first visibility flip happens synchronously inside `restart` (the
//! caret reacts to focus at t = 0, not one interval later); the spawned
//! loop then sleeps and flips once per period. Each wake re-checks the
//! `alive` probe (the widget's focus flag), keeping the polling exit
//! alongside token cancellation.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::cancel::{CancelSource, CancelToken};

/// Default interval between caret visibility flips.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Owns at most one running blink loop.
#[derive(Default)]
pub struct BlinkTask {
    generation: u64,
    source: Option<CancelSource>,
    thread: Option<JoinHandle<()>>,
}

impl BlinkTask {
    /// Create with no loop running.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of loops started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a loop has been started and not yet cancelled.
    ///
    /// The loop may still have exited on its own via the `alive` probe.
    pub fn is_running(&self) -> bool {
        self.source.is_some()
    }

    /// Supersede any running loop and start a new one.
    ///
    /// `toggle` flips the caret once immediately and then once per period;
    /// `alive` is checked before every flip and ends the loop when it
    /// reports `false`. When it is already `false` nothing starts at all.
    pub fn restart(
        &mut self,
        interval: Duration,
        mut toggle: impl FnMut() + Send + 'static,
        alive: impl Fn() -> bool + Send + 'static,
    ) {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        if !alive() {
            tracing::debug!(generation, "blink loop not started: widget unfocused");
            return;
        }

        let source = CancelSource::new();
        let token = source.token();
        tracing::debug!(generation, ?interval, "blink loop starting");
        toggle();

        self.thread = Some(thread::spawn(move || {
            run_loop(generation, interval, token, toggle, alive);
        }));
        self.source = Some(source);
    }

    /// Stop the running loop, if any, and wait for its thread to finish.
    ///
    /// The wake is immediate (the loop never sleeps out its interval after
    /// cancellation), so this is cheap to call from a focus-lost handler.
    pub fn cancel(&mut self) {
        if let Some(source) = self.source.take() {
            source.cancel();
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            tracing::debug!(generation = self.generation, "blink loop cancelled");
        }
    }
}

impl Drop for BlinkTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn run_loop(
    generation: u64,
    interval: Duration,
    token: CancelToken,
    mut toggle: impl FnMut(),
    alive: impl Fn() -> bool,
) {
    loop {
        if token.wait_timeout(interval) {
            tracing::trace!(generation, "blink loop: cancelled, exiting");
            break;
        }
        if !alive() {
            tracing::trace!(generation, "blink loop: focus gone, exiting");
            break;
        }
        toggle();
    }
}

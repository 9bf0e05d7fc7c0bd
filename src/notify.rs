//! Transient user-facing notifications with a self-clearing timer.
//!
//! The roster raises a notification for every action outcome; the shell
//! renders the current one, if any, before each prompt. A notification
//! stays up for [`CLEAR_DELAY`] and then clears itself. Showing a new
//! notification while one is pending replaces it and restarts the window;
//! the superseded timer is cancelled, and an epoch check makes a timer
//! that already woke up inert, so a stale clear can never wipe a newer
//! message.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long a notification stays visible before the scheduled clear.
pub const CLEAR_DELAY: Duration = Duration::from_secs(5);

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action was applied.
    Success,
    /// The action failed or the local view had to be corrected.
    Error,
}

/// A single transient status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// Success or error styling.
    pub severity: Severity,
}

/// Handle to the shared notification slot.
///
/// Clones are cheap and all see the same slot. Methods must be called
/// from within a Tokio runtime: the scheduled clear is a spawned task.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<State>,
    delay: Duration,
}

#[derive(Debug)]
struct State {
    current: Option<Notification>,
    /// Bumped on every show and clear; a scheduled clear only applies
    /// while its epoch still matches.
    epoch: u64,
    pending_clear: Option<JoinHandle<()>>,
}

impl Notifier {
    /// Create a notifier with the standard clear delay.
    pub fn new() -> Self {
        Self::with_delay(CLEAR_DELAY)
    }

    /// Create a notifier with a custom clear delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    current: None,
                    epoch: 0,
                    pending_clear: None,
                }),
                delay,
            }),
        }
    }

    /// Show a notification and schedule its clear.
    ///
    /// Cancels any previously scheduled clear first: after this call the
    /// latest `show` alone decides what is eventually cleared, and when.
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let note = Notification {
            message: message.into(),
            severity,
        };
        let Ok(mut state) = self.inner.state.lock() else {
            return;
        };
        if let Some(pending) = state.pending_clear.take() {
            pending.abort();
        }
        state.epoch = state.epoch.wrapping_add(1);
        state.current = Some(note);
        let epoch = state.epoch;
        let inner = Arc::clone(&self.inner);
        state.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.delay).await;
            inner.clear_if_current(epoch);
        }));
    }

    /// Show with success styling.
    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    /// Show with error styling.
    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    /// Drop the current notification now and cancel the pending clear.
    pub fn clear(&self) {
        if let Ok(mut state) = self.inner.state.lock() {
            if let Some(pending) = state.pending_clear.take() {
                pending.abort();
            }
            state.epoch = state.epoch.wrapping_add(1);
            state.current = None;
        }
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.inner
            .state
            .lock()
            .ok()
            .and_then(|state| state.current.clone())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Apply a scheduled clear unless a newer show or clear got there first.
    fn clear_if_current(&self, epoch: u64) {
        if let Ok(mut state) = self.state.lock() {
            if state.epoch == epoch {
                state.current = None;
                state.pending_clear = None;
            }
        }
    }
}

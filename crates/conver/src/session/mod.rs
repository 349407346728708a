//! Batch-mode session state for the word-processing application.

use tracing::warn;

/// Lifecycle of the application instance across a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No application instance is known to be running.
    #[default]
    Closed,
    /// The most recent dispatch asked the application to stay open.
    Open,
}

/// Process-lifecycle handle for batch mode.
///
/// Owned exclusively by one batch loop; requests are dispatched strictly
/// sequentially, so there is no shared mutable state and no locking. All but
/// the last request of a batch go out with `keepOpen = true` to amortize
/// application startup across files; only the last request carries the
/// caller's literal preference, so the session's final disposition matches
/// user intent.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    /// Whether the caller wants the application left open after the batch.
    intent: bool,
}

impl Session {
    pub fn new(keep_open_intent: bool) -> Self {
        Self {
            state: SessionState::Closed,
            intent: keep_open_intent,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Keep-open value to put on the wire for one request of the batch.
    pub fn effective_keep_open(&self, is_last: bool) -> bool {
        if is_last {
            self.intent
        } else {
            true
        }
    }

    /// Record the keep-open value actually sent with a completed dispatch.
    pub fn note_dispatched(&mut self, keep_open: bool) {
        self.state = if keep_open {
            SessionState::Open
        } else {
            SessionState::Closed
        };
    }
}

impl Drop for Session {
    /// Reconcile the session's disposition with caller intent.
    ///
    /// The wire protocol has no close-only command, so a batch aborted after
    /// a `keepOpen = true` dispatch cannot force the application shut without
    /// running another conversion; the mismatch is logged instead. A retried
    /// batch will simply reuse the open session.
    fn drop(&mut self) {
        if self.is_open() && !self.intent {
            warn!("application session left open by an unfinished batch");
        }
    }
}

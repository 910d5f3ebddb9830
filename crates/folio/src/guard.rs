//! Route protection.
//!
//! [`decide`] is the pure rule consulted before rendering a restricted view.
//! [`RouteGuard`] applies it to a live session, re-evaluating on every
//! state change so login, logout and startup resolution are all observed.

use tokio::sync::watch;
use tracing::debug;

use crate::routes::LOGIN_PATH;
use crate::session::{SessionSnapshot, SessionState};

/// What the navigation layer should do with a restricted view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup validation is still running; show a transient placeholder.
    Placeholder,
    /// Nobody is signed in; go to `to`, remembering the requested path.
    Redirect { to: String, from: String },
    /// Render the requested view.
    Render,
}

/// Decide how to treat a request for the restricted view at `requested`.
pub fn decide(state: &SessionState, requested: &str) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Placeholder,
        SessionState::Anonymous => GuardDecision::Redirect {
            to: LOGIN_PATH.to_string(),
            from: requested.to_string(),
        },
        SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

/// A restricted view bound to a live session.
///
/// A decision is reported each time the session actually changes, so a
/// redirect is emitted once per anonymous period. That holds even when a
/// sign-in and sign-out both land between two polls: the watch channel only
/// keeps the latest state, but its revision shows the session moved.
#[derive(Debug)]
pub struct RouteGuard {
    session: watch::Receiver<SessionSnapshot>,
    requested: String,
    seen: Option<u64>,
}

impl RouteGuard {
    pub fn new(session: watch::Receiver<SessionSnapshot>, requested: impl Into<String>) -> Self {
        Self {
            session,
            requested: requested.into(),
            seen: None,
        }
    }

    /// The path this guard protects.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// Evaluate against the state as it is now.
    pub fn current(&mut self) -> GuardDecision {
        let snapshot = self.session.borrow_and_update();
        self.seen = Some(snapshot.revision);
        decide(&snapshot.state, &self.requested)
    }

    /// Wait for the next session change and decide again.
    ///
    /// Returns `None` once the session manager has been dropped.
    pub async fn next(&mut self) -> Option<GuardDecision> {
        loop {
            self.session.changed().await.ok()?;
            let (decision, revision) = {
                let snapshot = self.session.borrow_and_update();
                (decide(&snapshot.state, &self.requested), snapshot.revision)
            };
            if self.seen == Some(revision) {
                continue;
            }
            debug!(path = %self.requested, ?decision, revision, "route decision");
            self.seen = Some(revision);
            return Some(decision);
        }
    }

    /// The first decision made after startup validation has resolved.
    ///
    /// Returns the placeholder only if the session manager was dropped
    /// before it resolved.
    pub async fn settled(&mut self) -> GuardDecision {
        let mut decision = self.current();
        while decision == GuardDecision::Placeholder {
            match self.next().await {
                Some(next) => decision = next,
                None => break,
            }
        }
        decision
    }
}

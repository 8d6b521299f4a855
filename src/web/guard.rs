//! Route guard run before every page render.
//!
//! Requests for a protected prefix without a session are redirected to the
//! login page. Everything else passes through untouched. The guard is UX
//! gating; the API still authorizes every data call.

use crate::web::{
    config::LOGIN_PATH,
    session::{SessionCredential, SessionStore},
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Ordered, case-sensitive list of protected path prefixes.
#[derive(Clone, Debug)]
pub struct ProtectedPaths(Vec<String>);

impl ProtectedPaths {
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = String>) -> Self {
        Self(prefixes.into_iter().collect())
    }

    /// First prefix the path starts with, if any.
    #[must_use]
    pub fn matching(&self, path: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|prefix| path.starts_with(prefix.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.matching(path).is_some()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

#[derive(Clone, Debug)]
pub struct RouteGuard {
    protected: ProtectedPaths,
}

impl RouteGuard {
    #[must_use]
    pub fn new(protected: ProtectedPaths) -> Self {
        Self { protected }
    }

    #[must_use]
    pub fn decide(&self, path: &str, credential: Option<&SessionCredential>) -> GuardDecision {
        match (self.protected.matching(path), credential) {
            (Some(prefix), None) => {
                debug!(path, prefix, "Protected path requested without a session");
                GuardDecision::RedirectToLogin
            }
            _ => GuardDecision::Allow,
        }
    }

    /// Resolves the session from the request cookies and decides.
    #[must_use]
    pub fn check(&self, sessions: &SessionStore, request: &Request) -> GuardDecision {
        let credential = sessions.credential(request.headers());
        self.decide(request.uri().path(), credential.as_ref())
    }
}

/// Axum middleware applying the [`RouteGuard`] to every request.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match state.guard().check(state.sessions(), &request) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
    }
}

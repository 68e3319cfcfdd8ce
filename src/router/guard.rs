// Navigation guard: the interceptor run before every navigation attempt.
//
// Strict linear decision sequence per attempt; no internal retry. A failed
// attempt always terminates at the login redirect, and the next
// user-initiated navigation starts over from a clean slate.

use std::sync::Arc;

use crate::error::ConsoleError;
use crate::router::coordinator::RouteCoordinator;
use crate::session::SessionStore;

/// Public paths reachable without a session
pub const DEFAULT_ALLOW_LIST: &[&str] = &["/login", "/404", "/401"];

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// One navigation attempt; ephemeral, never persisted
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub to: String,
    pub from: String,
}

impl NavigationRequest {
    pub fn to(path: &str) -> Self {
        Self {
            to: path.to_string(),
            from: String::new(),
        }
    }
}

/// Guard decision for a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Proceed to the requested target
    Allow,
    /// Abort and navigate to the given path instead
    Redirect(String),
    /// Routes were just generated; re-dispatch the original request so the
    /// newly installed target is resolvable
    Retry,
}

enum GenerationFailure {
    /// The session was torn down while the fetches were in flight; nothing
    /// was installed and nothing needs resetting
    Stale,
    Fatal(ConsoleError),
}

pub struct NavigationGuard {
    session: Arc<SessionStore>,
    coordinator: Arc<RouteCoordinator>,
    allow_list: Vec<String>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>, coordinator: Arc<RouteCoordinator>) -> Self {
        Self {
            session,
            coordinator,
            allow_list: DEFAULT_ALLOW_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_allow_list(mut self, allow_list: Vec<String>) -> Self {
        self.allow_list = allow_list;
        self
    }

    /// Run the decision table for one navigation attempt
    pub async fn before_each(&self, req: &NavigationRequest) -> GuardVerdict {
        if !self.session.is_logged_in() {
            if self.allow_list.iter().any(|p| p == &req.to) {
                return GuardVerdict::Allow;
            }
            tracing::debug!(to = %req.to, "unauthenticated navigation, redirecting to login");
            return GuardVerdict::Redirect(LOGIN_PATH.to_string());
        }

        // Already logged in; going back to the login page would loop
        if req.to == LOGIN_PATH {
            return GuardVerdict::Redirect(ROOT_PATH.to_string());
        }

        if self.coordinator.is_generated() {
            return GuardVerdict::Allow;
        }

        match self.run_generation().await {
            Ok(()) => {
                // The target may only exist in the freshly installed tree
                GuardVerdict::Retry
            }
            Err(GenerationFailure::Stale) => {
                tracing::debug!(to = %req.to, "session torn down during route generation");
                GuardVerdict::Redirect(LOGIN_PATH.to_string())
            }
            Err(GenerationFailure::Fatal(err)) => {
                tracing::error!(to = %req.to, error = %err, "route generation failed, forcing logout");
                self.session.reset();
                self.coordinator.reset_routes();
                GuardVerdict::Redirect(LOGIN_PATH.to_string())
            }
        }
    }

    /// Steps 5a-5c: profile, best-effort menu fetch, generation. The epoch
    /// check keeps a decision made against a pre-logout snapshot from
    /// installing routes after the teardown fired.
    async fn run_generation(&self) -> Result<(), GenerationFailure> {
        let epoch = self.session.epoch();

        if self.session.profile().is_none() {
            self.session
                .fetch_profile()
                .await
                .map_err(|e| GenerationFailure::Fatal(e.into()))?;
        }

        match self.session.fetch_routes().await {
            Ok(()) => {}
            Err(e) => {
                // A 401 is fatal even from the otherwise best-effort menu
                // fetch; anything else degrades to the static fallback
                let err = ConsoleError::from(e);
                if err.is_fatal() {
                    return Err(GenerationFailure::Fatal(err));
                }
                tracing::warn!("backend route menu unavailable, continuing with static fallback: {err}");
            }
        }

        if self.session.epoch() != epoch {
            return Err(GenerationFailure::Stale);
        }

        let raw_routes = self.session.raw_routes();
        self.coordinator
            .generate(&raw_routes)
            .map_err(|e| GenerationFailure::Fatal(e.into()))?;
        Ok(())
    }
}

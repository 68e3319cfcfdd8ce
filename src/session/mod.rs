// Session store: credential lifecycle and the authenticated principal's
// granted capability sets.
//
// Token presence is the sole externally observable "is logged in" signal.
// Every clearing path (logout, reset, detected 401) wipes token, profile,
// permissions, roles and raw routes in one write, so readers never observe a
// half-torn session.

pub mod credentials;

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::api::{AuthApi, LoginCredentials, TransportError, UserInfo};
use crate::capability::CapabilitySet;
use crate::routes::RouteDescriptor;
use crate::session::credentials::CredentialStore;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad credentials; user-correctable, no session state change
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Profile fetch failed; fatal to the navigation that needed it
    #[error("profile fetch failed: {0}")]
    ProfileFetchFailed(#[source] TransportError),

    /// Route menu fetch failed; non-fatal, callers fall back to the static
    /// catalog
    #[error("route fetch failed: {0}")]
    RouteFetchFailed(#[source] TransportError),

    /// Operation requires a non-empty token
    #[error("operation requires an authenticated session")]
    NotAuthenticated,
}

impl SessionError {
    /// A backend 401 is fatal no matter which call produced it
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SessionError::ProfileFetchFailed(e) | SessionError::RouteFetchFailed(e) => {
                e.is_unauthorized()
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    /// Authenticated, but the backend route menu could not be captured
    Degraded,
}

#[derive(Debug, Default)]
struct SessionState {
    token: String,
    profile: Option<UserInfo>,
    permissions: HashSet<String>,
    roles: HashSet<String>,
    raw_routes: Vec<RouteDescriptor>,
    phase: SessionPhase,
}

/// Process-wide session singleton; constructed once and shared by `Arc`.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    credentials: CredentialStore,
    state: RwLock<SessionState>,
    /// Bumped on every clear; in-flight guard sequences compare epochs to
    /// detect a concurrent teardown before installing routes
    epoch: AtomicU64,
}

impl SessionStore {
    /// Create the store, hydrating the token from the persisted credential
    /// record when one is still valid
    pub fn new(api: Arc<dyn AuthApi>, credentials: CredentialStore) -> Self {
        let mut state = SessionState::default();
        match credentials.load() {
            Ok(Some(token)) => {
                state.token = token;
                state.phase = SessionPhase::Authenticated;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("failed to read persisted credential: {e}"),
        }

        Self {
            api,
            credentials,
            state: RwLock::new(state),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !self.read().token.is_empty()
    }

    pub fn token(&self) -> String {
        self.read().token.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.read().phase
    }

    pub fn profile(&self) -> Option<UserInfo> {
        self.read().profile.clone()
    }

    /// Snapshot of the granted permission/role sets for capability checks
    pub fn capabilities(&self) -> CapabilitySet {
        let state = self.read();
        CapabilitySet::new(
            state.permissions.iter().cloned(),
            state.roles.iter().cloned(),
        )
    }

    pub fn raw_routes(&self) -> Vec<RouteDescriptor> {
        self.read().raw_routes.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Exchange credentials for a token. Never retries; a failure leaves the
    /// session exactly as it was.
    pub async fn login(&self, form: &LoginCredentials) -> Result<(), SessionError> {
        self.write().phase = SessionPhase::Authenticating;

        match self.api.login(form).await {
            Ok(result) => {
                {
                    let mut state = self.write();
                    state.token = result.token.clone();
                    state.phase = SessionPhase::Authenticated;
                }
                if let Err(e) = self.credentials.save(&result.token) {
                    tracing::warn!("failed to persist credential record: {e}");
                }
                Ok(())
            }
            Err(e) => {
                let mut state = self.write();
                state.phase = if state.token.is_empty() {
                    SessionPhase::Anonymous
                } else {
                    SessionPhase::Authenticated
                };
                Err(SessionError::AuthenticationFailed(e.message().to_string()))
            }
        }
    }

    /// Fetch profile plus permission/role sets and populate them in a single
    /// write: readers see all three fields or none of them.
    pub async fn fetch_profile(&self) -> Result<(), SessionError> {
        let token = self.require_token()?;

        let info = self
            .api
            .get_profile(&token)
            .await
            .map_err(SessionError::ProfileFetchFailed)?;

        let mut state = self.write();
        // A concurrent logout may have cleared the session while the fetch
        // was in flight; populating now would break the empty-token invariant
        if state.token != token {
            return Ok(());
        }
        state.permissions = info.permissions.iter().cloned().collect();
        state.roles = info.roles.iter().cloned().collect();
        state.profile = Some(info);
        Ok(())
    }

    /// Capture the backend route menu. Best-effort: failure marks the
    /// session degraded but does not invalidate it.
    pub async fn fetch_routes(&self) -> Result<(), SessionError> {
        let token = self.require_token()?;

        match self.api.get_routers(&token).await {
            Ok(routes) => {
                let mut state = self.write();
                if state.token != token {
                    return Ok(());
                }
                state.raw_routes = routes;
                Ok(())
            }
            Err(e) => {
                let mut state = self.write();
                if state.token == token {
                    state.phase = SessionPhase::Degraded;
                }
                Err(SessionError::RouteFetchFailed(e))
            }
        }
    }

    /// Backend logout is attempted but never surfaced; the local clear is
    /// unconditional.
    pub async fn logout(&self) {
        let token = self.token();
        if !token.is_empty() {
            if let Err(e) = self.api.logout(&token).await {
                tracing::warn!("backend logout failed, clearing local session anyway: {e}");
            }
        }
        self.clear();
    }

    /// Local-only invalidation, used after a detected 401
    pub fn reset(&self) {
        self.clear();
    }

    fn clear(&self) {
        {
            let mut state = self.write();
            *state = SessionState::default();
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("failed to clear persisted credential record: {e}");
        }
    }

    fn require_token(&self) -> Result<String, SessionError> {
        let token = self.token();
        if token.is_empty() {
            return Err(SessionError::NotAuthenticated);
        }
        Ok(token)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

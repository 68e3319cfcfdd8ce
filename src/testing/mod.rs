// Test doubles for the transport seam.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    AuthApi, CaptchaResult, LoginCredentials, LoginResult, TransportError, UserInfo,
};
use crate::routes::RouteDescriptor;

/// Outcome a mock endpoint should produce on its next call
pub enum MockOutcome<T> {
    Ok(T),
    Err(fn(String) -> TransportError, String),
}

impl<T: Clone> MockOutcome<T> {
    fn produce(&self) -> Result<T, TransportError> {
        match self {
            MockOutcome::Ok(v) => Ok(v.clone()),
            MockOutcome::Err(make, msg) => Err(make(msg.clone())),
        }
    }
}

/// In-memory `AuthApi` with per-endpoint programmable outcomes and call
/// counters. Unit tests drive the session store and navigation guard through
/// this instead of a live backend.
pub struct MockAuthApi {
    pub login_outcome: Mutex<MockOutcome<LoginResult>>,
    pub profile_outcome: Mutex<MockOutcome<UserInfo>>,
    pub routers_outcome: Mutex<MockOutcome<Vec<RouteDescriptor>>>,
    pub logout_outcome: Mutex<MockOutcome<()>>,
    pub calls: Mutex<HashMap<&'static str, AtomicUsize>>,
    /// Invoked while a `get_routers` call is in flight; lets tests interleave
    /// a session teardown with the guard's generation sequence
    pub routers_hook: Mutex<Option<Box<dyn Fn() + Send + Sync>>>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self {
            login_outcome: Mutex::new(MockOutcome::Ok(LoginResult {
                token: "test-token".to_string(),
            })),
            profile_outcome: Mutex::new(MockOutcome::Ok(admin_user())),
            routers_outcome: Mutex::new(MockOutcome::Ok(Vec::new())),
            logout_outcome: Mutex::new(MockOutcome::Ok(())),
            calls: Mutex::new(HashMap::new()),
            routers_hook: Mutex::new(None),
        }
    }

    pub fn fail_login(&self, msg: &str) {
        *self.login_outcome.lock().unwrap() =
            MockOutcome::Err(TransportError::ServerError, msg.to_string());
    }

    pub fn fail_profile(&self, make: fn(String) -> TransportError, msg: &str) {
        *self.profile_outcome.lock().unwrap() = MockOutcome::Err(make, msg.to_string());
    }

    pub fn fail_routers(&self, make: fn(String) -> TransportError, msg: &str) {
        *self.routers_outcome.lock().unwrap() = MockOutcome::Err(make, msg.to_string());
    }

    pub fn set_routers(&self, routes: Vec<RouteDescriptor>) {
        *self.routers_outcome.lock().unwrap() = MockOutcome::Ok(routes);
    }

    pub fn call_count(&self, endpoint: &'static str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(endpoint)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn record(&self, endpoint: &'static str) {
        self.calls
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_insert_with(|| AtomicUsize::new(0))
            .fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _form: &LoginCredentials) -> Result<LoginResult, TransportError> {
        self.record("login");
        self.login_outcome.lock().unwrap().produce()
    }

    async fn get_captcha(&self) -> Result<CaptchaResult, TransportError> {
        self.record("captcha");
        Ok(CaptchaResult {
            uuid: "captcha-uuid".to_string(),
            img: String::new(),
        })
    }

    async fn get_profile(&self, _token: &str) -> Result<UserInfo, TransportError> {
        self.record("profile");
        self.profile_outcome.lock().unwrap().produce()
    }

    async fn get_routers(&self, _token: &str) -> Result<Vec<RouteDescriptor>, TransportError> {
        self.record("routers");
        if let Some(hook) = self.routers_hook.lock().unwrap().as_ref() {
            hook();
        }
        self.routers_outcome.lock().unwrap().produce()
    }

    async fn logout(&self, _token: &str) -> Result<(), TransportError> {
        self.record("logout");
        self.logout_outcome.lock().unwrap().produce()
    }
}

/// Fully privileged test principal
pub fn admin_user() -> UserInfo {
    UserInfo {
        user_id: 1,
        user_name: "admin".to_string(),
        nick_name: "Administrator".to_string(),
        email: "admin@example.com".to_string(),
        phone: String::new(),
        sex: String::new(),
        avatar: String::new(),
        dept_id: 100,
        status: "0".to_string(),
        roles: vec!["admin".to_string()],
        permissions: vec!["*:*:*".to_string()],
    }
}

/// Unique throwaway directory for credential-store tests
pub fn temp_credential_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kairowan-test-{}-{}-{:?}",
        tag,
        std::process::id(),
        std::thread::current().id()
    ));
    std::fs::create_dir_all(&dir).expect("failed to create temp credential dir");
    dir
}

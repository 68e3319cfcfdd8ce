// In-process mock of the console backend.
//
// Speaks the same envelope as the real thing ({ code, msg, data }) so the
// HTTP transport is exercised end-to-end, including envelope-level 401s
// arriving with an HTTP 200 status line.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use kairowan_console::api::HttpAuthApi;
use kairowan_console::console::Console;
use kairowan_console::session::credentials::CredentialStore;

pub const TEST_PASSWORD: &str = "admin123";

pub struct BackendState {
    pub token: String,
    /// Respond to getInfo with an envelope-level 401
    pub expire_session: AtomicBool,
    /// Respond to getRouters with an HTTP 500
    pub fail_routers: AtomicBool,
    /// Respond to getRouters with an unconvertible descriptor
    pub corrupt_routers: AtomicBool,
    pub login_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub routers_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub fn routers_calls(&self) -> usize {
        self.state.routers_calls.load(Ordering::SeqCst)
    }
}

fn envelope(code: i64, msg: &str, data: Value) -> Json<Value> {
    Json(json!({ "code": code, "msg": msg, "data": data }))
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Json<Value> {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username == "admin" && password == TEST_PASSWORD {
        envelope(200, "ok", json!({ "token": state.token }))
    } else {
        envelope(500, "invalid username or password", Value::Null)
    }
}

async fn captcha() -> Json<Value> {
    envelope(
        200,
        "ok",
        json!({ "uuid": uuid::Uuid::new_v4().to_string(), "img": "" }),
    )
}

async fn get_info(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Json<Value> {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);

    if state.expire_session.load(Ordering::SeqCst) {
        return envelope(401, "session expired", Value::Null);
    }
    if bearer(&headers).as_deref() != Some(state.token.as_str()) {
        return envelope(401, "invalid token", Value::Null);
    }

    envelope(
        200,
        "ok",
        json!({
            "userId": 1,
            "userName": "admin",
            "nickName": "Administrator",
            "email": "admin@example.com",
            "roles": ["admin"],
            "permissions": ["*:*:*"]
        }),
    )
}

async fn get_routers(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, axum::http::StatusCode> {
    state.routers_calls.fetch_add(1, Ordering::SeqCst);

    if state.fail_routers.load(Ordering::SeqCst) {
        return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
    if bearer(&headers).as_deref() != Some(state.token.as_str()) {
        return Ok(envelope(401, "invalid token", Value::Null));
    }

    if state.corrupt_routers.load(Ordering::SeqCst) {
        return Ok(envelope(
            200,
            "ok",
            json!([{ "name": "Broken", "path": "/broken", "component": "", "meta": {} }]),
        ));
    }

    Ok(envelope(
        200,
        "ok",
        json!([
            {
                "name": "Reports",
                "path": "/reports",
                "component": "Layout",
                "redirect": "/reports/daily",
                "meta": { "title": "Reports", "icon": "Document" },
                "children": [
                    {
                        "name": "Daily",
                        "path": "daily",
                        "component": "reports/daily/index",
                        "meta": { "title": "Daily", "permission": "reports:daily:list" }
                    },
                    {
                        "name": "Audit",
                        "path": "audit",
                        "component": "reports/audit/index",
                        "meta": { "title": "Audit", "permission": "reports:audit:list" }
                    }
                ]
            }
        ]),
    ))
}

async fn logout(State(state): State<Arc<BackendState>>) -> Json<Value> {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    envelope(200, "ok", Value::Null)
}

/// Bind the mock backend on a free port and serve it for the rest of the
/// test process
pub async fn spawn_backend() -> Result<MockBackend> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let state = Arc::new(BackendState {
        token: uuid::Uuid::new_v4().to_string(),
        expire_session: AtomicBool::new(false),
        fail_routers: AtomicBool::new(false),
        corrupt_routers: AtomicBool::new(false),
        login_calls: AtomicUsize::new(0),
        profile_calls: AtomicUsize::new(0),
        routers_calls: AtomicUsize::new(0),
        logout_calls: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/getInfo", get(get_info))
        .route("/auth/getRouters", get(get_routers))
        .route("/captcha", get(captcha))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind mock backend")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockBackend { base_url, state })
}

pub fn temp_credential_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kairowan-itest-{}-{}",
        tag,
        uuid::Uuid::new_v4().simple()
    ));
    std::fs::create_dir_all(&dir).expect("failed to create temp credential dir");
    dir
}

/// Console wired against the mock backend with an isolated credential dir
pub fn console_for(backend: &MockBackend, credential_dir: PathBuf) -> Result<Console> {
    let base_url = Url::parse(&backend.base_url)?;
    let api = HttpAuthApi::new(base_url, Duration::from_secs(5))
        .map_err(|e| anyhow::anyhow!("failed to build transport: {e}"))?;
    let credentials = CredentialStore::new(credential_dir, "kairowan_token", 7);
    Ok(Console::assemble(Arc::new(api), credentials))
}

pub fn login_form() -> kairowan_console::api::LoginCredentials {
    kairowan_console::api::LoginCredentials {
        username: "admin".to_string(),
        password: TEST_PASSWORD.to_string(),
        code: String::new(),
        uuid: String::new(),
    }
}

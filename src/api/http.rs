use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::error::TransportError;
use crate::api::types::{CaptchaResult, Envelope, LoginCredentials, LoginResult, UserInfo};
use crate::api::AuthApi;
use crate::routes::RouteDescriptor;

/// Concrete transport talking to the console backend over HTTP.
///
/// Unwraps the KResult envelope on every response: envelope code 200 yields
/// the payload, envelope code 401 classifies as `Unauthorized` even when the
/// HTTP status line says 200.
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: Url,
    log_requests: bool,
}

impl HttpAuthApi {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            log_requests: false,
        })
    }

    /// Build a transport from the global application config
    pub fn from_config() -> Result<Self, TransportError> {
        let cfg = crate::config::config();
        let base_url = Url::parse(&cfg.api.base_url)
            .map_err(|e| TransportError::Network(format!("invalid base url {}: {}", cfg.api.base_url, e)))?;

        let mut api = Self::new(base_url, Duration::from_secs(cfg.api.timeout_secs))?;
        api.log_requests = cfg.api.enable_request_logging;
        Ok(api)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Perform a request and unwrap the response envelope down to its payload
    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(path);
        if self.log_requests {
            tracing::debug!(%method, %url, "console api request");
        }

        let mut req = self.client.request(method, &url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Prefer the backend message when the error body still carries an envelope
            let msg = match response.json::<Envelope>().await {
                Ok(env) if !env.msg.is_empty() => env.msg,
                _ => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            return Err(TransportError::from_status(status, msg));
        }

        let envelope: Envelope = response.json().await?;
        match envelope.code {
            200 => Ok(envelope.data.unwrap_or(Value::Null)),
            401 => Err(TransportError::Unauthorized(envelope.msg)),
            code => Err(TransportError::ServerError(format!(
                "{}: {}",
                code, envelope.msg
            ))),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, TransportError> {
        let data = self.request(Method::GET, path, token, None).await?;
        serde_json::from_value(data).map_err(|e| TransportError::Envelope(e.to_string()))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, form: &LoginCredentials) -> Result<LoginResult, TransportError> {
        let body = serde_json::to_value(form).map_err(|e| TransportError::Envelope(e.to_string()))?;
        let data = self.request(Method::POST, "/auth/login", None, Some(&body)).await?;
        serde_json::from_value(data).map_err(|e| TransportError::Envelope(e.to_string()))
    }

    async fn get_captcha(&self) -> Result<CaptchaResult, TransportError> {
        self.get("/captcha", None).await
    }

    async fn get_profile(&self, token: &str) -> Result<UserInfo, TransportError> {
        self.get("/auth/getInfo", Some(token)).await
    }

    async fn get_routers(&self, token: &str) -> Result<Vec<RouteDescriptor>, TransportError> {
        self.get("/auth/getRouters", Some(token)).await
    }

    async fn logout(&self, token: &str) -> Result<(), TransportError> {
        self.request(Method::POST, "/auth/logout", Some(token), None)
            .await
            .map(|_| ())
    }
}

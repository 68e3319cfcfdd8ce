// Transport collaborator: the narrow HTTP surface the session core consumes.

pub mod error;
pub mod http;
pub mod types;

use async_trait::async_trait;

pub use error::TransportError;
pub use http::HttpAuthApi;
pub use types::{CaptchaResult, Envelope, LoginCredentials, LoginResult, UserInfo};

use crate::routes::RouteDescriptor;

/// Authentication backend surface consumed by the session store.
///
/// Kept behind a trait so the core never depends on the concrete HTTP client;
/// tests drive the session store through an in-memory implementation.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an opaque session token
    async fn login(&self, form: &LoginCredentials) -> Result<LoginResult, TransportError>;

    /// Fetch a captcha challenge for the login form
    async fn get_captcha(&self) -> Result<CaptchaResult, TransportError>;

    /// Fetch the principal profile plus granted permission/role sets
    async fn get_profile(&self, token: &str) -> Result<UserInfo, TransportError>;

    /// Fetch the raw route descriptor tree for the session's menu
    async fn get_routers(&self, token: &str) -> Result<Vec<RouteDescriptor>, TransportError>;

    /// Invalidate the session server-side
    async fn logout(&self, token: &str) -> Result<(), TransportError>;
}

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Key under which the credential record is stored on disk
    pub token_key: String,
    /// Credential record lifetime, stamped at login
    pub token_expiry_days: i64,
    /// Public paths the navigation guard never gates
    pub public_paths: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("KAIROWAN_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("KAIROWAN_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("KAIROWAN_API_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Auth overrides
        if let Ok(v) = env::var("KAIROWAN_TOKEN_KEY") {
            self.auth.token_key = v;
        }
        if let Ok(v) = env::var("KAIROWAN_TOKEN_EXPIRY_DAYS") {
            self.auth.token_expiry_days = v.parse().unwrap_or(self.auth.token_expiry_days);
        }

        self
    }

    fn base_auth() -> AuthConfig {
        AuthConfig {
            token_key: "kairowan_token".to_string(),
            token_expiry_days: 7,
            public_paths: vec![
                "/login".to_string(),
                "/404".to_string(),
                "/401".to_string(),
            ],
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8080/api".to_string(),
                timeout_secs: 15,
                enable_request_logging: true,
            },
            auth: Self::base_auth(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.kairowan.example.com/api".to_string(),
                timeout_secs: 15,
                enable_request_logging: true,
            },
            auth: Self::base_auth(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://app.kairowan.example.com/api".to_string(),
                timeout_secs: 15,
                enable_request_logging: false,
            },
            auth: Self::base_auth(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

// Persisted credential record.
//
// The console keeps exactly one piece of durable state: the session token,
// stamped with an expiry at login and removed at logout/reset. Route
// generation and permission sets are rebuilt per session.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("KAIROWAN_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("kairowan").join("console")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// File-backed token store keyed by the application identifier
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
    key: String,
    expiry_days: i64,
}

impl CredentialStore {
    pub fn new(dir: PathBuf, key: impl Into<String>, expiry_days: i64) -> Self {
        Self {
            dir,
            key: key.into(),
            expiry_days,
        }
    }

    pub fn from_config() -> anyhow::Result<Self> {
        let cfg = crate::config::config();
        Ok(Self::new(
            get_config_dir()?,
            cfg.auth.token_key.clone(),
            cfg.auth.token_expiry_days,
        ))
    }

    fn record_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// Load a still-valid token; expired records read as absent
    pub fn load(&self) -> anyhow::Result<Option<String>> {
        let path = self.record_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let record: CredentialRecord = serde_json::from_str(&content)?;

        if record.expires_at <= Utc::now() {
            // Stale credential, drop it eagerly
            let _ = fs::remove_file(&path);
            return Ok(None);
        }

        Ok(Some(record.token))
    }

    pub fn save(&self, token: &str) -> anyhow::Result<()> {
        let record = CredentialRecord {
            token: token.to_string(),
            expires_at: Utc::now() + Duration::days(self.expiry_days),
        };

        let content = serde_json::to_string_pretty(&record)?;
        fs::write(self.record_path(), content)?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        let path = self.record_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// Wire types for the console auth API.
//
// The backend wraps every payload in a KResult-style envelope:
// { "code": 200, "msg": "ok", "data": ... }

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope returned by every backend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Login form submitted to POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
    /// Captcha answer, echoing a previously issued challenge
    #[serde(default)]
    pub code: String,
    /// Identifier of the captcha challenge the answer belongs to
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
}

/// Principal profile plus granted capability sets, as returned by GET /auth/getInfo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub dept_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Captcha challenge returned by GET /captcha
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaResult {
    pub uuid: String,
    /// Base64-encoded challenge image; opaque to this crate
    pub img: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_tolerates_missing_data() {
        let env: Envelope = serde_json::from_value(json!({"code": 200, "msg": "ok"})).unwrap();
        assert_eq!(env.code, 200);
        assert!(env.data.is_none());
    }

    #[test]
    fn user_info_deserializes_camel_case() {
        let info: UserInfo = serde_json::from_value(json!({
            "userId": 1,
            "userName": "admin",
            "nickName": "Administrator",
            "roles": ["admin"],
            "permissions": ["*:*:*"]
        }))
        .unwrap();
        assert_eq!(info.user_name, "admin");
        assert_eq!(info.permissions, vec!["*:*:*"]);
    }
}

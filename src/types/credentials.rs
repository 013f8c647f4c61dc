use serde::{Deserialize, Serialize};

/// Access token returned by the token endpoints.
///
/// Caching and refreshing before `expires_in` elapses is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default)]
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
}

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}

/// OAuth2 authorization scope for web page sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScope {
    /// Silent sign-in, yields only the user id / openid
    SnsapiBase,
    /// Prompts for basic profile information
    SnsapiUserinfo,
    /// WeCom only: prompts for sensitive profile fields
    SnsapiPrivateinfo,
}

impl AuthScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScope::SnsapiBase => "snsapi_base",
            AuthScope::SnsapiUserinfo => "snsapi_userinfo",
            AuthScope::SnsapiPrivateinfo => "snsapi_privateinfo",
        }
    }
}

impl std::fmt::Display for AuthScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

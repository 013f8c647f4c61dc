//! WeCom (enterprise WeChat) client

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::action::{Action, ApiAction};
use crate::crypto::{self, ServerConfig};
use crate::error::WechatError;
use crate::types::{AccessToken, AuthScope};
use crate::urls;

use super::builder::CorpBuilder;
use super::dispatcher::Dispatcher;
use super::transport::HttpOption;

/// WeCom client
///
/// Owns the corp id, the optional callback server configuration and the
/// transport. Cheap to clone and safe to share across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use wechat_open_sdk::{api::agent, Corp};
///
/// let corp = Corp::builder("ww1234567890abcdef").build()?;
/// let token = corp.access_token("agent_secret", &[]).await?;
///
/// let mut list = agent::AgentListResult::default();
/// corp.execute(token.as_str(), agent::agent_list(&mut list), &[]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Corp {
    corpid: String,
    server: Option<ServerConfig>,
    dispatcher: Dispatcher,
}

impl Corp {
    pub fn builder(corpid: impl Into<String>) -> CorpBuilder {
        CorpBuilder::new(corpid)
    }

    pub(crate) fn from_parts(
        corpid: String,
        server: Option<ServerConfig>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            corpid,
            server,
            dispatcher,
        }
    }

    pub fn corp_id(&self) -> &str {
        &self.corpid
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Web page OAuth2 authorize URL.
    pub fn oauth2_url(&self, scope: AuthScope, redirect_url: &str, state: &str) -> String {
        format!(
            "{}?appid={}&redirect_uri={}&response_type=code&scope={}&state={}#wechat_redirect",
            urls::CORP_OAUTH2_AUTHORIZE,
            self.corpid,
            utf8_percent_encode(redirect_url, NON_ALPHANUMERIC),
            scope,
            utf8_percent_encode(state, NON_ALPHANUMERIC),
        )
    }

    /// QR code sign-in URL for an agent.
    pub fn qrcode_auth_url(&self, agent_id: &str, redirect_url: &str, state: &str) -> String {
        format!(
            "{}?appid={}&agentid={}&redirect_uri={}&state={}",
            urls::CORP_QRCODE_AUTHORIZE,
            self.corpid,
            agent_id,
            utf8_percent_encode(redirect_url, NON_ALPHANUMERIC),
            utf8_percent_encode(state, NON_ALPHANUMERIC),
        )
    }

    /// Fetch an access token for the application owning `secret`.
    ///
    /// The token is returned as-is; storing and refreshing it is the
    /// caller's job.
    pub async fn access_token(
        &self,
        secret: &str,
        options: &[HttpOption],
    ) -> Result<AccessToken, WechatError> {
        let mut token = AccessToken::default();
        let action = ApiAction::get(urls::CORP_ACCESS_TOKEN)
            .with_query("corpid", self.corpid.as_str())
            .with_query("corpsecret", secret)
            .with_json_decode(&mut token);

        self.dispatcher.execute("", action, options).await?;
        Ok(token)
    }

    /// Execute an action with the given access token.
    pub async fn execute<A: Action>(
        &self,
        access_token: &str,
        action: A,
        options: &[HttpOption],
    ) -> Result<(), WechatError> {
        self.dispatcher.execute(access_token, action, options).await
    }

    /// Verify a callback signature.
    ///
    /// `items` are `timestamp`, `nonce` and either `echostr` (URL
    /// verification) or `msg_encrypt` (event push). Always `false` when no
    /// server config was set.
    pub fn verify_event_sign(&self, signature: &str, items: &[&str]) -> bool {
        self.server
            .as_ref()
            .map(|server| server.verify_signature(signature, items))
            .unwrap_or(false)
    }

    /// Decrypt a callback `Encrypt` field into the inner message bytes.
    pub fn decrypt_event_message(&self, encrypt: &str) -> Result<Vec<u8>, WechatError> {
        let server = self
            .server
            .as_ref()
            .ok_or_else(|| WechatError::Config("server config is required".to_string()))?;
        crypto::decrypt(&self.corpid, &server.encoding_aes_key, encrypt)
    }
}

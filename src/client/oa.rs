//! Official account client

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::action::{Action, ApiAction};
use crate::crypto::{self, ServerConfig};
use crate::error::WechatError;
use crate::types::{AccessToken, AuthScope};
use crate::urls;

use super::builder::OaBuilder;
use super::dispatcher::Dispatcher;
use super::transport::HttpOption;

/// Official account client
///
/// # Example
///
/// ```rust,ignore
/// use wechat_open_sdk::{api::menu, Oa};
///
/// let oa = Oa::builder("wx1234567890abcdef", "app_secret").build()?;
/// let token = oa.access_token(&[]).await?;
///
/// let action = menu::create_menu(vec![menu::click_button("Today", "V1001_TODAY_MUSIC")]);
/// oa.execute(token.as_str(), action, &[]).await?;
/// ```
#[derive(Clone)]
pub struct Oa {
    appid: String,
    secret: String,
    server: Option<ServerConfig>,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for Oa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oa")
            .field("appid", &self.appid)
            .field("server", &self.server)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl Oa {
    pub fn builder(appid: impl Into<String>, secret: impl Into<String>) -> OaBuilder {
        OaBuilder::new(appid, secret)
    }

    pub(crate) fn from_parts(
        appid: String,
        secret: String,
        server: Option<ServerConfig>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            appid,
            secret,
            server,
            dispatcher,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.appid
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Web page OAuth2 authorize URL.
    pub fn oauth2_url(&self, scope: AuthScope, redirect_url: &str, state: &str) -> String {
        format!(
            "{}?appid={}&redirect_uri={}&response_type=code&scope={}&state={}#wechat_redirect",
            urls::OA_OAUTH2_AUTHORIZE,
            self.appid,
            utf8_percent_encode(redirect_url, NON_ALPHANUMERIC),
            scope,
            utf8_percent_encode(state, NON_ALPHANUMERIC),
        )
    }

    /// Fetch an access token with the app credentials.
    pub async fn access_token(&self, options: &[HttpOption]) -> Result<AccessToken, WechatError> {
        let mut token = AccessToken::default();
        let action = ApiAction::get(urls::OA_ACCESS_TOKEN)
            .with_query("grant_type", "client_credential")
            .with_query("appid", self.appid.as_str())
            .with_query("secret", self.secret.as_str())
            .with_json_decode(&mut token);

        self.dispatcher.execute("", action, options).await?;
        Ok(token)
    }

    pub async fn execute<A: Action>(
        &self,
        access_token: &str,
        action: A,
        options: &[HttpOption],
    ) -> Result<(), WechatError> {
        self.dispatcher.execute(access_token, action, options).await
    }

    pub fn verify_event_sign(&self, signature: &str, items: &[&str]) -> bool {
        self.server
            .as_ref()
            .map(|server| server.verify_signature(signature, items))
            .unwrap_or(false)
    }

    pub fn decrypt_event_message(&self, encrypt: &str) -> Result<Vec<u8>, WechatError> {
        let server = self
            .server
            .as_ref()
            .ok_or_else(|| WechatError::Config("server config is required".to_string()))?;
        crypto::decrypt(&self.appid, &server.encoding_aes_key, encrypt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth2_url() {
        let oa = Oa::builder("wx1234567890abcdef", "secret").build().unwrap();
        let url = oa.oauth2_url(AuthScope::SnsapiUserinfo, "https://a.com/", "s");
        assert_eq!(
            url,
            "https://open.weixin.qq.com/connect/oauth2/authorize?appid=wx1234567890abcdef\
             &redirect_uri=https%3A%2F%2Fa%2Ecom%2F&response_type=code\
             &scope=snsapi_userinfo&state=s#wechat_redirect"
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let oa = Oa::builder("wx1234567890abcdef", "very_secret").build().unwrap();
        assert!(!format!("{oa:?}").contains("very_secret"));
    }
}

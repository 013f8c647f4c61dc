use std::sync::Arc;
use std::time::Duration;

use crate::crypto::ServerConfig;
use crate::error::WechatError;

use super::corp::Corp;
use super::dispatcher::Dispatcher;
use super::oa::Oa;
use super::transport::{HttpClient, ReqwestHttpClient};

/// Transport settings shared by the platform builders.
#[derive(Default)]
struct TransportConfig {
    http_client: Option<Arc<dyn HttpClient>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    verbose_logging: bool,
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("http_client", &self.http_client.as_ref().map(|_| ".."))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("verbose_logging", &self.verbose_logging)
            .finish()
    }
}

impl TransportConfig {
    /// An injected client wins; the default reqwest client is only built
    /// when none was supplied.
    fn into_dispatcher(self) -> Result<Dispatcher, WechatError> {
        let http: Arc<dyn HttpClient> = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = ReqwestHttpClient::builder().verbose_logging(self.verbose_logging);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                Arc::new(builder.build()?)
            }
        };
        Ok(Dispatcher::new(http))
    }
}

fn require(value: String, name: &str) -> Result<String, WechatError> {
    if value.trim().is_empty() {
        return Err(WechatError::Config(format!("{name} is required")));
    }
    Ok(value)
}

/// Builder for [`Corp`]
///
/// # Example
///
/// ```rust
/// use wechat_open_sdk::Corp;
///
/// let corp = Corp::builder("ww1234567890abcdef")
///     .server_config("token", "jWmYm7qr5nMoAUwZRjGtBxmz3KA1tkAj3ykkR6q2B2C")
///     .build()
///     .unwrap();
///
/// assert_eq!(corp.corp_id(), "ww1234567890abcdef");
/// ```
#[must_use]
#[derive(Debug)]
pub struct CorpBuilder {
    corpid: String,
    server: Option<ServerConfig>,
    transport: TransportConfig,
}

impl CorpBuilder {
    pub(crate) fn new(corpid: impl Into<String>) -> Self {
        Self {
            corpid: corpid.into(),
            server: None,
            transport: TransportConfig::default(),
        }
    }

    /// Callback server token and EncodingAESKey
    pub fn server_config(
        mut self,
        token: impl Into<String>,
        encoding_aes_key: impl Into<String>,
    ) -> Self {
        self.server = Some(ServerConfig::new(token, encoding_aes_key));
        self
    }

    /// Use this transport instead of the default reqwest client.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.transport.http_client = Some(client);
        self
    }

    /// Default: 30 seconds. Ignored when a custom client is injected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }

    /// Default: 10 seconds. Ignored when a custom client is injected.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport.connect_timeout = Some(timeout);
        self
    }

    pub fn verbose_logging(mut self, verbose: bool) -> Self {
        self.transport.verbose_logging = verbose;
        self
    }

    /// # Errors
    /// Returns `WechatError::Config` if the corp id is empty.
    pub fn build(self) -> Result<Corp, WechatError> {
        let corpid = require(self.corpid, "corpid")?;
        let dispatcher = self.transport.into_dispatcher()?;
        Ok(Corp::from_parts(corpid, self.server, dispatcher))
    }
}

/// Builder for [`Oa`]
#[must_use]
#[derive(Debug)]
pub struct OaBuilder {
    appid: String,
    secret: String,
    server: Option<ServerConfig>,
    transport: TransportConfig,
}

impl OaBuilder {
    pub(crate) fn new(appid: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            appid: appid.into(),
            secret: secret.into(),
            server: None,
            transport: TransportConfig::default(),
        }
    }

    /// Callback server token and EncodingAESKey
    pub fn server_config(
        mut self,
        token: impl Into<String>,
        encoding_aes_key: impl Into<String>,
    ) -> Self {
        self.server = Some(ServerConfig::new(token, encoding_aes_key));
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.transport.http_client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport.connect_timeout = Some(timeout);
        self
    }

    pub fn verbose_logging(mut self, verbose: bool) -> Self {
        self.transport.verbose_logging = verbose;
        self
    }

    /// # Errors
    /// Returns `WechatError::Config` if the app id or secret is empty.
    pub fn build(self) -> Result<Oa, WechatError> {
        let appid = require(self.appid, "appid")?;
        let secret = require(self.secret, "secret")?;
        let dispatcher = self.transport.into_dispatcher()?;
        Ok(Oa::from_parts(appid, secret, self.server, dispatcher))
    }
}

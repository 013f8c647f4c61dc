//! HTTP transport capability
//!
//! The dispatcher never talks to the network itself. It hands method, URL
//! and body (or multipart form) to an [`HttpClient`] and gets raw response
//! bytes back. [`ReqwestHttpClient`] is the default implementation; tests
//! and callers with special needs inject their own.

use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tower::{Layer, Service};

use crate::error::{HttpError, WechatError};
use crate::middleware::LoggingMiddleware;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Per-call transport override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOption {
    /// Extra request header.
    Header(String, String),
    /// Total timeout for this call only.
    Timeout(Duration),
    /// Ask the server to close the connection after the response.
    Close,
}

/// Multipart form for upload endpoints.
///
/// One file part plus optional text fields, e.g. the `description` JSON
/// required by permanent video uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file_field: String,
    pub file_name: String,
    pub content: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn new(
        file_field: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_field: file_field.into(),
            file_name: file_name.into(),
            content: content.into(),
            fields: Vec::new(),
        }
    }

    /// Add a plain text field to the form.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    fn into_multipart(self) -> Form {
        let part = Part::bytes(self.content).file_name(self.file_name);
        self.fields
            .into_iter()
            .fold(Form::new().part(self.file_field, part), |form, (k, v)| {
                form.text(k, v)
            })
    }
}

/// Transport capability consumed by the dispatcher.
///
/// Implementations own connection handling, TLS and status checking. Any
/// error they return is passed to the caller unchanged.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request with an optional raw body (JSON for POST endpoints).
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        options: &[HttpOption],
    ) -> Result<Vec<u8>, WechatError>;

    /// POST a multipart form.
    async fn upload(
        &self,
        url: &str,
        form: UploadForm,
        options: &[HttpOption],
    ) -> Result<Vec<u8>, WechatError>;
}

/// Default [`HttpClient`] backed by reqwest.
///
/// Every request passes through [`LoggingMiddleware`]. Non-2xx responses
/// are returned as [`HttpError::Reqwest`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    http: Client,
    logging: LoggingMiddleware,
}

impl ReqwestHttpClient {
    pub fn builder() -> ReqwestHttpClientBuilder {
        ReqwestHttpClientBuilder::default()
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(http: Client) -> Self {
        Self {
            http,
            logging: LoggingMiddleware::new(),
        }
    }

    fn apply_options(
        mut request: reqwest::RequestBuilder,
        options: &[HttpOption],
    ) -> reqwest::RequestBuilder {
        for option in options {
            request = match option {
                HttpOption::Header(name, value) => request.header(name.as_str(), value.as_str()),
                HttpOption::Timeout(timeout) => request.timeout(*timeout),
                HttpOption::Close => request.header(http::header::CONNECTION, "close"),
            };
        }
        request
    }

    async fn send(&self, request: reqwest::Request) -> Result<Vec<u8>, WechatError> {
        let mut service = self.logging.layer(self.http.clone());
        let response = service.call(request).await.map_err(HttpError::from)?;
        let response = response.error_for_status().map_err(HttpError::from)?;
        let bytes = response.bytes().await.map_err(HttpError::from)?;
        Ok(bytes.to_vec())
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::from_client(Client::new())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        options: &[HttpOption],
    ) -> Result<Vec<u8>, WechatError> {
        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder
                .header(http::header::CONTENT_TYPE, "application/json; charset=utf-8")
                .body(body);
        }
        let request = Self::apply_options(builder, options)
            .build()
            .map_err(HttpError::from)?;
        self.send(request).await
    }

    async fn upload(
        &self,
        url: &str,
        form: UploadForm,
        options: &[HttpOption],
    ) -> Result<Vec<u8>, WechatError> {
        let builder = self.http.post(url).multipart(form.into_multipart());
        let request = Self::apply_options(builder, options)
            .build()
            .map_err(HttpError::from)?;
        self.send(request).await
    }
}

/// Builder for [`ReqwestHttpClient`]
#[derive(Debug, Default)]
pub struct ReqwestHttpClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    verbose_logging: bool,
}

impl ReqwestHttpClientBuilder {
    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `WechatError::Http` if reqwest cannot initialise its TLS backend.
    pub fn build(self) -> Result<ReqwestHttpClient, WechatError> {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(HttpError::from)?;

        let logging = if self.verbose_logging {
            LoggingMiddleware::new().verbose()
        } else {
            LoggingMiddleware::new()
        };

        Ok(ReqwestHttpClient { http, logging })
    }
}

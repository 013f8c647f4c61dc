//! Actions: one remote operation as a value
//!
//! An [`Action`] describes everything the dispatcher needs to call an
//! endpoint: HTTP method, URL for a given access token, how to produce the
//! request body or multipart form, and how to decode a successful response.
//!
//! Endpoints do not get a type each. [`ApiAction`] is configured with a URL
//! and optional strategies:
//!
//! ```rust
//! use wechat_open_sdk::action::{Action, ApiAction};
//!
//! #[derive(Default, serde::Deserialize)]
//! struct Agents {
//!     agentlist: Vec<serde_json::Value>,
//! }
//!
//! let mut dest = Agents::default();
//! let action = ApiAction::get("https://qyapi.weixin.qq.com/cgi-bin/agent/list")
//!     .with_query("page", "1")
//!     .with_json_decode(&mut dest);
//!
//! assert_eq!(
//!     action.url("TOKEN"),
//!     "https://qyapi.weixin.qq.com/cgi-bin/agent/list?access_token=TOKEN&page=1"
//! );
//! ```
//!
//! Building an action never does I/O or serialization. Those run when the
//! dispatcher calls [`Action::body`], [`Action::upload_form`] and
//! [`Action::decode`].

use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::UploadForm;
use crate::error::WechatError;

/// Characters left as-is in query components (RFC 3986 unreserved).
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Capability set of a single remote operation.
///
/// The dispatcher consults exactly one of [`body`](Action::body) and
/// [`upload_form`](Action::upload_form), selected by
/// [`is_upload`](Action::is_upload).
pub trait Action: Send {
    fn method(&self) -> Method;

    /// Full request URL for the given access token.
    fn url(&self, access_token: &str) -> String;

    fn is_upload(&self) -> bool;

    /// Request body, `None` when nothing is sent.
    fn body(&self) -> Result<Option<Vec<u8>>, WechatError>;

    fn upload_form(&self) -> Result<UploadForm, WechatError>;

    /// Decode a response whose envelope already reported success.
    fn decode(&mut self, response: &[u8]) -> Result<(), WechatError>;
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn method(&self) -> Method {
        (**self).method()
    }

    fn url(&self, access_token: &str) -> String {
        (**self).url(access_token)
    }

    fn is_upload(&self) -> bool {
        (**self).is_upload()
    }

    fn body(&self) -> Result<Option<Vec<u8>>, WechatError> {
        (**self).body()
    }

    fn upload_form(&self) -> Result<UploadForm, WechatError> {
        (**self).upload_form()
    }

    fn decode(&mut self, response: &[u8]) -> Result<(), WechatError> {
        (**self).decode(response)
    }
}

type BodyFn<'a> = Box<dyn Fn() -> Result<Vec<u8>, WechatError> + Send + Sync + 'a>;
type FormFn<'a> = Box<dyn Fn() -> Result<UploadForm, WechatError> + Send + Sync + 'a>;
type DecodeFn<'a> = Box<dyn FnMut(&[u8]) -> Result<(), WechatError> + Send + 'a>;

/// The configurable [`Action`] behind every endpoint in this crate.
///
/// The lifetime `'a` covers whatever the strategies borrow, typically the
/// caller's result struct written by the decode step.
pub struct ApiAction<'a> {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    upload: bool,
    body: Option<BodyFn<'a>>,
    upload_form: Option<FormFn<'a>>,
    decode: Option<DecodeFn<'a>>,
}

impl std::fmt::Debug for ApiAction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAction")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("upload", &self.upload)
            .field("body", &self.body.as_ref().map(|_| ".."))
            .field("upload_form", &self.upload_form.as_ref().map(|_| ".."))
            .field("decode", &self.decode.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<'a> ApiAction<'a> {
    fn new(method: Method, url: impl Into<String>, upload: bool) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            upload,
            body: None,
            upload_form: None,
            decode: None,
        }
    }

    /// A GET action. GET actions never send a body.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url, false)
    }

    /// A POST action, usually paired with [`with_json`](Self::with_json).
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url, false)
    }

    /// A multipart upload action, paired with [`with_upload_form`](Self::with_upload_form).
    pub fn upload(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url, true)
    }

    /// Append a query parameter. Parameters keep insertion order.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<Vec<u8>, WechatError> + Send + Sync + 'a,
    {
        self.body = Some(Box::new(f));
        self
    }

    /// Send `params` serialized as JSON.
    ///
    /// Serialization is deferred until dispatch; failures surface as
    /// [`WechatError::Encode`].
    pub fn with_json<T>(self, params: T) -> Self
    where
        T: Serialize + Send + Sync + 'a,
    {
        self.with_body(move || serde_json::to_vec(&params).map_err(WechatError::encode))
    }

    pub fn with_upload_form<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<UploadForm, WechatError> + Send + Sync + 'a,
    {
        self.upload_form = Some(Box::new(f));
        self
    }

    pub fn with_decode<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[u8]) -> Result<(), WechatError> + Send + 'a,
    {
        self.decode = Some(Box::new(f));
        self
    }

    /// Deserialize the whole response into `dest`.
    pub fn with_json_decode<T>(self, dest: &'a mut T) -> Self
    where
        T: DeserializeOwned + Send,
    {
        self.with_decode(move |response| {
            *dest = serde_json::from_slice(response).map_err(WechatError::decode)?;
            Ok(())
        })
    }
}

impl Action for ApiAction<'_> {
    fn method(&self) -> Method {
        self.method.clone()
    }

    fn url(&self, access_token: &str) -> String {
        let mut pairs = Vec::with_capacity(self.query.len() + 1);
        if !access_token.is_empty() {
            pairs.push(format!(
                "access_token={}",
                utf8_percent_encode(access_token, QUERY_ENCODE_SET)
            ));
        }
        pairs.extend(self.query.iter().map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_ENCODE_SET),
                utf8_percent_encode(v, QUERY_ENCODE_SET)
            )
        }));

        if pairs.is_empty() {
            return self.url.clone();
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, pairs.join("&"))
    }

    fn is_upload(&self) -> bool {
        self.upload
    }

    fn body(&self) -> Result<Option<Vec<u8>>, WechatError> {
        if self.method == Method::GET {
            return Ok(None);
        }
        self.body.as_ref().map(|f| f()).transpose()
    }

    fn upload_form(&self) -> Result<UploadForm, WechatError> {
        match &self.upload_form {
            Some(f) => f(),
            None => Err(WechatError::Encode(format!(
                "no upload form configured for {}",
                self.url
            ))),
        }
    }

    fn decode(&mut self, response: &[u8]) -> Result<(), WechatError> {
        match self.decode.as_mut() {
            Some(f) => f(response),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_get_url_with_token_and_query() {
        let action = ApiAction::get("https://qyapi.weixin.qq.com/cgi-bin/agent/get")
            .with_query("agentid", "1000002");
        assert_eq!(action.method(), Method::GET);
        assert_eq!(
            action.url("ACCESS_TOKEN"),
            "https://qyapi.weixin.qq.com/cgi-bin/agent/get?access_token=ACCESS_TOKEN&agentid=1000002"
        );
    }

    #[test]
    fn test_url_keeps_query_insertion_order() {
        let action = ApiAction::get("https://example.com/api")
            .with_query("z", "1")
            .with_query("a", "2");
        assert_eq!(
            action.url("T"),
            "https://example.com/api?access_token=T&z=1&a=2"
        );
    }

    #[test]
    fn test_url_without_token_omits_access_token() {
        let action = ApiAction::get("https://example.com/token").with_query("corpid", "ww1");
        assert_eq!(action.url(""), "https://example.com/token?corpid=ww1");

        let bare = ApiAction::get("https://example.com/token");
        assert_eq!(bare.url(""), "https://example.com/token");
    }

    #[test]
    fn test_url_percent_encodes_values() {
        let action =
            ApiAction::get("https://example.com/api").with_query("redirect", "https://a.b/c?d=e f");
        assert_eq!(
            action.url("a+b/c="),
            "https://example.com/api?access_token=a%2Bb%2Fc%3D&redirect=https%3A%2F%2Fa.b%2Fc%3Fd%3De%20f"
        );
    }

    #[test]
    fn test_url_template_with_existing_query() {
        let action = ApiAction::get("https://example.com/api?type=image");
        assert_eq!(action.url("T"), "https://example.com/api?type=image&access_token=T");
    }

    #[test]
    fn test_get_never_sends_body() {
        let action = ApiAction::get("https://example.com/api").with_body(|| Ok(b"{}".to_vec()));
        assert_eq!(action.body().unwrap(), None);
    }

    #[test]
    fn test_post_without_body_sends_nothing() {
        let action = ApiAction::post("https://example.com/api");
        assert_eq!(action.method(), Method::POST);
        assert!(!action.is_upload());
        assert_eq!(action.body().unwrap(), None);
    }

    #[test]
    fn test_with_json_serializes_lazily() {
        let mut params = HashMap::new();
        params.insert("menuid", "208379533");
        let action = ApiAction::post("https://example.com/api").with_json(params);

        let body = action.body().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"menuid": "208379533"}));
    }

    #[test]
    fn test_with_json_reports_encode_error() {
        let mut params = HashMap::new();
        params.insert((1, 2), "tuple keys are not valid JSON object keys");
        let action = ApiAction::post("https://example.com/api").with_json(params);

        assert!(matches!(action.body(), Err(WechatError::Encode(_))));
    }

    #[test]
    fn test_upload_action_uses_form() {
        let action = ApiAction::upload("https://example.com/upload")
            .with_query("type", "image")
            .with_upload_form(|| Ok(UploadForm::new("media", "a.jpg", b"jpg".to_vec())));

        assert!(action.is_upload());
        assert_eq!(action.method(), Method::POST);
        assert_eq!(action.upload_form().unwrap().file_name, "a.jpg");
        assert_eq!(action.url("T"), "https://example.com/upload?access_token=T&type=image");
    }

    #[test]
    fn test_missing_upload_form_is_encode_error() {
        let action = ApiAction::upload("https://example.com/upload");
        assert!(matches!(action.upload_form(), Err(WechatError::Encode(_))));
    }

    #[test]
    fn test_default_decode_is_noop() {
        let mut action = ApiAction::get("https://example.com/api");
        assert!(action.decode(b"not even json").is_ok());
    }

    #[test]
    fn test_json_decode_writes_destination() {
        #[derive(Debug, Default, serde::Deserialize)]
        struct Dest {
            name: String,
        }

        let mut dest = Dest::default();
        {
            let mut action = ApiAction::get("https://example.com/api").with_json_decode(&mut dest);
            action.decode(br#"{"errcode":0,"name":"agent"}"#).unwrap();
        }
        assert_eq!(dest.name, "agent");
    }

    #[test]
    fn test_json_decode_shape_mismatch_is_decode_error() {
        #[derive(Debug, Default, serde::Deserialize)]
        struct Dest {
            #[allow(dead_code)]
            count: u32,
        }

        let mut dest = Dest::default();
        let mut action = ApiAction::get("https://example.com/api").with_json_decode(&mut dest);
        assert!(matches!(
            action.decode(br#"{"count":"many"}"#),
            Err(WechatError::Decode(_))
        ));
    }

    #[test]
    fn test_boxed_action_delegates() {
        let action: Box<dyn Action> =
            Box::new(ApiAction::post("https://example.com/api").with_body(|| Ok(b"x".to_vec())));
        assert_eq!(action.method(), Method::POST);
        assert_eq!(action.body().unwrap(), Some(b"x".to_vec()));
    }
}

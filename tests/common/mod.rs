//! Recording `HttpClient` test double.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use http::Method;
use wechat_open_sdk::client::{HttpClient, HttpOption, UploadForm};
use wechat_open_sdk::error::{HttpError, WechatError};

/// One call seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Request {
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
        options: Vec<HttpOption>,
    },
    Upload {
        url: String,
        form: UploadForm,
        options: Vec<HttpOption>,
    },
}

impl Call {
    pub fn url(&self) -> &str {
        match self {
            Call::Request { url, .. } | Call::Upload { url, .. } => url,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Call::Request { method, .. } => method.clone(),
            Call::Upload { .. } => Method::POST,
        }
    }

    pub fn json_body(&self) -> serde_json::Value {
        match self {
            Call::Request {
                body: Some(body), ..
            } => serde_json::from_slice(body).expect("body is JSON"),
            other => panic!("call has no body: {other:?}"),
        }
    }
}

/// Canned outcome for the next call.
pub enum Reply {
    Body(Vec<u8>),
    TransportError(String),
}

#[derive(Default)]
pub struct MockHttpClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body.
    pub fn reply(self, body: impl Into<Vec<u8>>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Body(body.into()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::TransportError(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<Vec<u8>, WechatError> {
        self.calls.lock().unwrap().push(call);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::TransportError(msg)) => Err(HttpError::Transport(msg).into()),
            None => panic!("unexpected call: no reply queued"),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        options: &[HttpOption],
    ) -> Result<Vec<u8>, WechatError> {
        self.next(Call::Request {
            method,
            url: url.to_string(),
            body,
            options: options.to_vec(),
        })
    }

    async fn upload(
        &self,
        url: &str,
        form: UploadForm,
        options: &[HttpOption],
    ) -> Result<Vec<u8>, WechatError> {
        self.next(Call::Upload {
            url: url.to_string(),
            form,
            options: options.to_vec(),
        })
    }
}

use thiserror::Error;

/// Transport-level failure.
///
/// Produced by an [`HttpClient`](crate::client::HttpClient) implementation and
/// surfaced by the dispatcher unchanged.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Failure reported by a custom transport.
    #[error("transport error: {0}")]
    Transport(String),
}

/// WeChat SDK error types
#[derive(Debug, Error)]
pub enum WechatError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Non-zero `errcode` in the response envelope.
    ///
    /// Displays as `code|message`.
    #[error("{code}|{message}")]
    Api { code: i64, message: String },

    #[error("request encoding error: {0}")]
    Encode(String),

    #[error("response decoding error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl WechatError {
    pub(crate) fn encode(err: impl std::fmt::Display) -> Self {
        WechatError::Encode(err.to_string())
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        WechatError::Decode(err.to_string())
    }

    /// Returns the remote error code if this is an envelope error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            WechatError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WechatError {
    fn from(err: reqwest::Error) -> Self {
        WechatError::Http(HttpError::Reqwest(err))
    }
}

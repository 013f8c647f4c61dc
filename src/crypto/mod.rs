//! Callback event verification and decryption
//!
//! WeChat signs callback requests with the server token configured in the
//! admin console and, in safe mode, encrypts message bodies with the
//! EncodingAESKey.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wechat_open_sdk::crypto;
//!
//! let ok = crypto::sign_with_sha1(token, &[timestamp, nonce, msg_encrypt]) == msg_signature;
//! let xml = crypto::decrypt(corpid, encoding_aes_key, msg_encrypt)?;
//! ```

pub mod event;

pub use event::{decrypt, encrypt, sign_with_sha1};

/// Server token and EncodingAESKey from the callback configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub token: String,
    pub encoding_aes_key: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("token", &"[REDACTED]")
            .field("encoding_aes_key", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    pub fn new(token: impl Into<String>, encoding_aes_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            encoding_aes_key: encoding_aes_key.into(),
        }
    }

    pub fn verify_signature(&self, signature: &str, items: &[&str]) -> bool {
        sign_with_sha1(&self.token, items) == signature
    }
}

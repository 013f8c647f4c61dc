//! Response envelope codec
//!
//! Every WeChat response is a JSON object carrying `errcode` / `errmsg`
//! next to the endpoint payload. `errcode == 0` means success, and many
//! endpoints omit the field entirely on success, so a missing `errcode`
//! is success as well.
//!
//! ```rust
//! use wechat_open_sdk::envelope::Envelope;
//!
//! let env = Envelope::parse(br#"{"errcode": 40013, "errmsg": "invalid appid"}"#);
//! assert!(!env.is_success());
//! assert_eq!(env.into_result().unwrap_err().to_string(), "40013|invalid appid");
//!
//! assert!(Envelope::parse(br#"{"menu": {}}"#).is_success());
//! ```

use serde_json::Value;

use crate::error::WechatError;

/// The `errcode` / `errmsg` pair of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub errcode: i64,
    pub errmsg: String,
}

impl Envelope {
    /// Extract the envelope fields from a raw response.
    ///
    /// Never fails: a body that is not a JSON object reads as success and
    /// payload validation is left to the action's decode step.
    pub fn parse(response: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(response) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        Self {
            errcode: value.get("errcode").map(read_code).unwrap_or(0),
            errmsg: value.get("errmsg").map(read_message).unwrap_or_default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }

    /// Convert into `Ok(())` or [`WechatError::Api`].
    pub fn into_result(self) -> Result<(), WechatError> {
        if self.is_success() {
            return Ok(());
        }
        Err(WechatError::Api {
            code: self.errcode,
            message: self.errmsg,
        })
    }
}

/// Parse and check a response envelope in one step.
pub fn check(response: &[u8]) -> Result<(), WechatError> {
    Envelope::parse(response).into_result()
}

fn read_code(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

fn read_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

//! Action dispatcher

use std::sync::Arc;

use log::{debug, warn};

use crate::action::Action;
use crate::envelope::Envelope;
use crate::error::WechatError;
use crate::middleware::redact_url;

use super::transport::{HttpClient, HttpOption};

/// Executes [`Action`]s against an injected [`HttpClient`].
///
/// Holds no mutable state, so one dispatcher can serve concurrent calls.
#[derive(Clone)]
pub struct Dispatcher {
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("http", &"HttpClient { .. }")
            .finish()
    }
}

impl Dispatcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Run one action.
    ///
    /// 1. Build the multipart form (uploads) or the body; failures return
    ///    before any network call.
    /// 2. Send through the transport; its errors are returned unchanged.
    /// 3. A non-zero `errcode` returns [`WechatError::Api`] without decoding.
    /// 4. Otherwise the full response goes to [`Action::decode`].
    ///
    /// A decode error may leave the action's destination partially written.
    pub async fn execute<A>(
        &self,
        access_token: &str,
        mut action: A,
        options: &[HttpOption],
    ) -> Result<(), WechatError>
    where
        A: Action,
    {
        let url = action.url(access_token);

        let response = if action.is_upload() {
            let form = action.upload_form()?;
            debug!("[wechat] upload {}", redact_url(&url));
            self.http.upload(&url, form, options).await?
        } else {
            let body = action.body()?;
            let method = action.method();
            debug!("[wechat] {} {}", method, redact_url(&url));
            self.http.request(method, &url, body, options).await?
        };

        let envelope = Envelope::parse(&response);
        if !envelope.is_success() {
            warn!(
                "[wechat] {} failed: errcode={} errmsg={}",
                redact_url(&url),
                envelope.errcode,
                envelope.errmsg
            );
            return envelope.into_result();
        }

        action.decode(&response)
    }
}

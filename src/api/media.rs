//! WeCom Temporary Media API
//!
//! Uploads files valid for 3 days, referenced by `media_id` in messages.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wechat_open_sdk::api::media::{upload_media, MediaType, MediaUploadResult};
//! use wechat_open_sdk::client::UploadForm;
//!
//! let data = std::fs::read("image.jpg")?;
//! let mut result = MediaUploadResult::default();
//! let action = upload_media(MediaType::Image, "image.jpg", data, &mut result);
//! corp.execute(token.as_str(), action, &[]).await?;
//! println!("Media ID: {}", result.media_id);
//! ```

use serde::{Deserialize, Serialize};

use crate::action::ApiAction;
use crate::client::UploadForm;
use crate::urls;

/// Media type for temporary media upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Image file (jpg, png), up to 10MB
    Image,
    /// Voice file (amr), up to 2MB
    Voice,
    /// Video file (mp4), up to 10MB
    Video,
    /// Any file, up to 20MB
    File,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Voice => "voice",
            MediaType::Video => "video",
            MediaType::File => "file",
        }
    }
}

/// Response from temporary media upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaUploadResult {
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default)]
    pub media_id: String,
    /// Unix timestamp; WeCom sends it as a string
    #[serde(default)]
    pub created_at: String,
}

/// Upload a temporary media file.
///
/// POST /cgi-bin/media/upload?type=TYPE, multipart field `media`
pub fn upload_media(
    media_type: MediaType,
    file_name: impl Into<String>,
    content: Vec<u8>,
    dest: &mut MediaUploadResult,
) -> ApiAction<'_> {
    let file_name = file_name.into();
    ApiAction::upload(urls::CORP_MEDIA_UPLOAD)
        .with_query("type", media_type.as_str())
        .with_upload_form(move || Ok(UploadForm::new("media", file_name.clone(), content.clone())))
        .with_json_decode(dest)
}

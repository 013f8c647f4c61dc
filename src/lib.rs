//! WeChat Official Account and WeCom SDK for Rust
//!
//! Every remote operation is an [`Action`](action::Action): a value that
//! knows its method, its URL for a given access token, how to build its
//! body or multipart form, and how to decode a successful response into
//! storage the caller owns. A [`Dispatcher`](client::Dispatcher) runs
//! actions over an injectable [`HttpClient`](client::HttpClient) and
//! applies the `errcode` / `errmsg` envelope contract shared by all
//! endpoints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wechat_open_sdk::api::menu::{self, click_button, group_button, view_button, MenuInfo};
//! use wechat_open_sdk::Oa;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let oa = Oa::builder("wx1234567890abcdef", "your_secret").build()?;
//!     let token = oa.access_token(&[]).await?;
//!
//!     oa.execute(
//!         token.as_str(),
//!         menu::create_menu(vec![
//!             click_button("Today", "V1001_TODAY_MUSIC"),
//!             group_button("Menu", vec![view_button("Search", "http://www.soso.com/")]),
//!         ]),
//!         &[],
//!     )
//!     .await?;
//!
//!     let mut info = MenuInfo::default();
//!     oa.execute(token.as_str(), menu::get_menu(&mut info), &[]).await?;
//!     println!("{:?}", info.default_menu);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`action`] - The action abstraction and its configurable implementation
//! - [`api`] - Endpoint families built from actions (menu, agent, media)
//! - [`client`] - Platform clients, dispatcher and HTTP transport
//! - [`crypto`] - Callback signature verification and message decryption
//! - [`envelope`] - `errcode` / `errmsg` response codec
//! - [`error`] - Error types
//! - [`middleware`] - Tower layers used by the default transport
//! - [`types`] - Shared credential types
//! - [`urls`] - Endpoint URLs
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wechat_open_sdk::WechatError;
//!
//! match oa.execute(token.as_str(), action, &[]).await {
//!     Ok(()) => {}
//!     Err(WechatError::Api { code, message }) => eprintln!("{code}|{message}"),
//!     Err(WechatError::Http(e)) => eprintln!("transport: {e}"),
//!     Err(e) => eprintln!("other: {e}"),
//! }
//! ```
//!
//! The SDK never retries, rate-limits or caches tokens.

pub mod action;
pub mod api;
pub mod client;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod types;
pub mod urls;

pub use action::{Action, ApiAction};
pub use client::{Corp, Dispatcher, HttpClient, HttpOption, Oa, UploadForm};
pub use error::{HttpError, WechatError};

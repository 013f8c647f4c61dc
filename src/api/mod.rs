//! Endpoint families
//!
//! Each function here only builds an [`ApiAction`](crate::action::ApiAction);
//! run it with [`Oa::execute`](crate::Oa::execute) or
//! [`Corp::execute`](crate::Corp::execute).
//!
//! - [`menu`] - Official account custom menus (default and conditional)
//! - [`agent`] - WeCom application settings
//! - [`media`] - WeCom temporary media upload

pub mod agent;
pub mod media;
pub mod menu;

pub use agent::{AgentGetResult, AgentListItem, AgentListResult, AgentSetParams};
pub use media::{MediaType, MediaUploadResult};
pub use menu::{ConditionalMenu, DefaultMenu, MenuButton, MenuInfo, MenuMatchResult, MenuMatchRule};

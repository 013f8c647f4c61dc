//! Custom Menu API
//!
//! Official account menus: the default menu plus any number of
//! conditional (personalized) menus selected by a [`MenuMatchRule`].
//!
//! ## Button kinds
//!
//! A [`MenuButton`] carries every field of every kind; which fields matter
//! depends on `type`:
//!
//! | kind | fields |
//! |------|--------|
//! | `click`, `scancode_*`, `pic_*`, `location_select` | `key` |
//! | `view` | `url` |
//! | `miniprogram` | `appid`, `pagepath`, `url` (fallback for old clients) |
//! | `media_id`, `view_limited` | `media_id` |
//! | group | no `type`, non-empty `sub_button` |
//!
//! Groups hold leaf buttons only; a group inside a group is rejected by
//! the server. Empty string fields are left out of request bodies, while
//! `sub_button` is always written, as `[]` for leaves.
//!
//! ## Example
//!
//! ```rust
//! use wechat_open_sdk::api::menu::{self, click_button, group_button, view_button};
//! use wechat_open_sdk::action::Action;
//!
//! let action = menu::create_menu(vec![
//!     click_button("Today", "V1001_TODAY_MUSIC"),
//!     group_button("Menu", vec![view_button("Search", "http://www.soso.com/")]),
//! ]);
//!
//! let body: serde_json::Value =
//!     serde_json::from_slice(&action.body().unwrap().unwrap()).unwrap();
//! assert_eq!(body["button"][0]["sub_button"], serde_json::json!([]));
//! assert_eq!(body["button"][1]["sub_button"][0]["type"], "view");
//! ```

use serde::{Deserialize, Serialize};

use crate::action::ApiAction;
use crate::urls;

/// Menu button type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    /// Pushes a click event carrying `key`
    Click,
    /// Opens `url`
    View,
    /// Opens the scanner and handles the result client side
    ScancodePush,
    /// Opens the scanner and pushes the result with a "receiving" prompt
    ScancodeWaitMsg,
    PicSysPhoto,
    PicPhotoOrAlbum,
    PicWeixin,
    LocationSelect,
    /// Sends the permanent material `media_id`
    MediaId,
    /// Opens the article material `media_id`
    ViewLimited,
    /// Opens a mini program page
    MiniProgram,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Click => "click",
            ButtonType::View => "view",
            ButtonType::ScancodePush => "scancode_push",
            ButtonType::ScancodeWaitMsg => "scancode_waitmsg",
            ButtonType::PicSysPhoto => "pic_sysphoto",
            ButtonType::PicPhotoOrAlbum => "pic_photo_or_album",
            ButtonType::PicWeixin => "pic_weixin",
            ButtonType::LocationSelect => "location_select",
            ButtonType::MediaId => "media_id",
            ButtonType::ViewLimited => "view_limited",
            ButtonType::MiniProgram => "miniprogram",
        }
    }
}

/// One menu node, either a leaf button or a group of leaf buttons.
///
/// All fields are always present in memory; unused ones are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub button_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(rename = "appid", default, skip_serializing_if = "String::is_empty")]
    pub app_id: String,
    #[serde(rename = "pagepath", default, skip_serializing_if = "String::is_empty")]
    pub page_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_id: String,
    /// Children of a group; `[]` on the wire for leaves.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_button: Vec<MenuButton>,
}

impl MenuButton {
    fn leaf(button_type: ButtonType, name: impl Into<String>) -> Self {
        Self {
            button_type: button_type.as_str().to_string(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_group(&self) -> bool {
        !self.sub_button.is_empty()
    }
}

/// `null` and absent lists both read as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Click button pushing a `CLICK` event with `key`.
pub fn click_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    MenuButton {
        key: key.into(),
        ..MenuButton::leaf(ButtonType::Click, name)
    }
}

/// Button opening a web page.
pub fn view_button(name: impl Into<String>, url: impl Into<String>) -> MenuButton {
    MenuButton {
        url: url.into(),
        ..MenuButton::leaf(ButtonType::View, name)
    }
}

/// Button opening a mini program page. `url` is shown by clients too old
/// to open mini programs.
pub fn mini_program_button(
    name: impl Into<String>,
    app_id: impl Into<String>,
    page_path: impl Into<String>,
    url: impl Into<String>,
) -> MenuButton {
    MenuButton {
        app_id: app_id.into(),
        page_path: page_path.into(),
        url: url.into(),
        ..MenuButton::leaf(ButtonType::MiniProgram, name)
    }
}

/// Button sending a permanent material.
pub fn media_button(name: impl Into<String>, media_id: impl Into<String>) -> MenuButton {
    MenuButton {
        media_id: media_id.into(),
        ..MenuButton::leaf(ButtonType::MediaId, name)
    }
}

/// Button opening a published article material.
pub fn view_limited_button(name: impl Into<String>, media_id: impl Into<String>) -> MenuButton {
    MenuButton {
        media_id: media_id.into(),
        ..MenuButton::leaf(ButtonType::ViewLimited, name)
    }
}

fn keyed_button(
    button_type: ButtonType,
    name: impl Into<String>,
    key: impl Into<String>,
) -> MenuButton {
    MenuButton {
        key: key.into(),
        ..MenuButton::leaf(button_type, name)
    }
}

pub fn scancode_push_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    keyed_button(ButtonType::ScancodePush, name, key)
}

pub fn scancode_waitmsg_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    keyed_button(ButtonType::ScancodeWaitMsg, name, key)
}

pub fn pic_sysphoto_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    keyed_button(ButtonType::PicSysPhoto, name, key)
}

pub fn pic_photo_or_album_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    keyed_button(ButtonType::PicPhotoOrAlbum, name, key)
}

pub fn pic_weixin_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    keyed_button(ButtonType::PicWeixin, name, key)
}

pub fn location_select_button(name: impl Into<String>, key: impl Into<String>) -> MenuButton {
    keyed_button(ButtonType::LocationSelect, name, key)
}

/// Group node holding leaf buttons (at most 5).
pub fn group_button(name: impl Into<String>, buttons: Vec<MenuButton>) -> MenuButton {
    MenuButton {
        name: name.into(),
        sub_button: buttons,
        ..MenuButton::default()
    }
}

/// Predicate selecting the users who see a conditional menu.
///
/// Empty fields do not participate in matching and are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuMatchRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_id: String,
    /// `1` male, `2` female
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sex: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub province: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    /// `1` iOS, `2` Android, `3` others
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_platform_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
}

/// Menu shown to users matching `match_rule`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalMenu {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub button: Vec<MenuButton>,
    #[serde(rename = "matchrule", default, skip_serializing_if = "Option::is_none")]
    pub match_rule: Option<MenuMatchRule>,
    /// Assigned by the server once created
    #[serde(rename = "menuid", default)]
    pub menu_id: i64,
}

/// The unconditional menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMenu {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub button: Vec<MenuButton>,
    #[serde(rename = "menuid", default)]
    pub menu_id: i64,
}

/// Result of [`get_menu`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuInfo {
    #[serde(rename = "menu", default)]
    pub default_menu: Option<DefaultMenu>,
    #[serde(rename = "conditionalmenu", default, deserialize_with = "null_as_empty")]
    pub conditional_menu: Vec<ConditionalMenu>,
}

/// Result of [`try_match_menu`]: the buttons the given user would see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MenuMatchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub button: Vec<MenuButton>,
}

#[derive(Debug, Serialize)]
struct CreateMenuParams {
    button: Vec<MenuButton>,
}

#[derive(Debug, Serialize)]
struct CreateConditionalMenuParams {
    button: Vec<MenuButton>,
    #[serde(rename = "matchrule")]
    match_rule: MenuMatchRule,
}

#[derive(Debug, Serialize)]
struct DeleteConditionalMenuParams {
    #[serde(rename = "menuid")]
    menu_id: String,
}

#[derive(Debug, Serialize)]
struct TryMatchParams {
    user_id: String,
}

/// Create the default menu.
///
/// POST /cgi-bin/menu/create
pub fn create_menu(buttons: Vec<MenuButton>) -> ApiAction<'static> {
    ApiAction::post(urls::OA_MENU_CREATE).with_json(CreateMenuParams { button: buttons })
}

/// Create a conditional menu. The response's `menuid` is discarded; read
/// it back with [`get_menu`].
///
/// POST /cgi-bin/menu/addconditional
pub fn create_conditional_menu(
    match_rule: MenuMatchRule,
    buttons: Vec<MenuButton>,
) -> ApiAction<'static> {
    ApiAction::post(urls::OA_MENU_ADD_CONDITIONAL).with_json(CreateConditionalMenuParams {
        button: buttons,
        match_rule,
    })
}

/// Query the default menu and all conditional menus into `dest`.
///
/// GET /cgi-bin/menu/get
pub fn get_menu(dest: &mut MenuInfo) -> ApiAction<'_> {
    ApiAction::get(urls::OA_MENU_GET).with_json_decode(dest)
}

/// Delete the default menu together with all conditional menus.
///
/// GET /cgi-bin/menu/delete
pub fn delete_menu() -> ApiAction<'static> {
    ApiAction::get(urls::OA_MENU_DELETE)
}

/// Delete one conditional menu by id.
///
/// POST /cgi-bin/menu/delconditional
pub fn delete_conditional_menu(menu_id: impl Into<String>) -> ApiAction<'static> {
    ApiAction::post(urls::OA_MENU_DELETE_CONDITIONAL).with_json(DeleteConditionalMenuParams {
        menu_id: menu_id.into(),
    })
}

/// Resolve which menu a user sees. `user_id` is an openid or WeChat id.
///
/// POST /cgi-bin/menu/trymatch
pub fn try_match_menu(user_id: impl Into<String>, dest: &mut MenuMatchResult) -> ApiAction<'_> {
    ApiAction::post(urls::OA_MENU_TRY_MATCH)
        .with_json(TryMatchParams {
            user_id: user_id.into(),
        })
        .with_json_decode(dest)
}

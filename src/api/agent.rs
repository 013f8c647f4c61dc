//! WeCom Application (agent) API
//!
//! Read and update the settings of self-built applications.

use serde::{Deserialize, Serialize};

use crate::action::ApiAction;
use crate::urls;

/// Application details from `agent/get`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgentGetResult {
    #[serde(rename = "agentid", default, deserialize_with = "string_or_number")]
    pub agent_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub square_logo_url: String,
    #[serde(default)]
    pub description: String,
    /// `1` when the application is disabled
    #[serde(default)]
    pub close: i32,
    #[serde(default)]
    pub redirect_domain: String,
    #[serde(default)]
    pub report_location_flag: i32,
    #[serde(rename = "isreportenter", alias = "is_reportenter", default)]
    pub is_report_enter: i32,
    #[serde(default)]
    pub home_url: String,
    #[serde(rename = "allow_userinfos", default)]
    pub allow_user_infos: Option<AllowUserInfos>,
    #[serde(rename = "allow_partys", default)]
    pub allow_parties: Option<AllowParties>,
    #[serde(default)]
    pub allow_tags: Option<AllowTags>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AllowUserInfos {
    #[serde(default)]
    pub user: Vec<AllowUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AllowUser {
    #[serde(rename = "userid", default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AllowParties {
    #[serde(rename = "partyid", alias = "partid", default)]
    pub party_id: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AllowTags {
    #[serde(rename = "tagid", default)]
    pub tag_id: Vec<i64>,
}

/// Applications visible to the calling token, from `agent/list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgentListResult {
    #[serde(rename = "agentlist", default)]
    pub agent_list: Vec<AgentListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgentListItem {
    #[serde(rename = "agentid", default, deserialize_with = "string_or_number")]
    pub agent_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub square_logo_url: String,
}

/// Settings accepted by `agent/set`. Only `agent_id` is required; empty
/// fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentSetParams {
    #[serde(rename = "agentid")]
    pub agent_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "logo_mediaid", skip_serializing_if = "String::is_empty")]
    pub logo_media_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect_domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_location_flag: Option<i32>,
    #[serde(rename = "isreportenter", skip_serializing_if = "Option::is_none")]
    pub is_report_enter: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub home_url: String,
}

/// WeCom returns `agentid` as a number, older docs show a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// GET /cgi-bin/agent/get
pub fn agent_get(agent_id: impl Into<String>, dest: &mut AgentGetResult) -> ApiAction<'_> {
    ApiAction::get(urls::CORP_AGENT_GET)
        .with_query("agentid", agent_id)
        .with_json_decode(dest)
}

/// GET /cgi-bin/agent/list
pub fn agent_list(dest: &mut AgentListResult) -> ApiAction<'_> {
    ApiAction::get(urls::CORP_AGENT_LIST).with_json_decode(dest)
}

/// POST /cgi-bin/agent/set
pub fn agent_set(params: AgentSetParams) -> ApiAction<'static> {
    ApiAction::post(urls::CORP_AGENT_SET).with_json(params)
}

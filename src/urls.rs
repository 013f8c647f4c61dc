//! Endpoint URLs

// Official account
pub const OA_ACCESS_TOKEN: &str = "https://api.weixin.qq.com/cgi-bin/token";
pub const OA_OAUTH2_AUTHORIZE: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";
pub const OA_MENU_CREATE: &str = "https://api.weixin.qq.com/cgi-bin/menu/create";
pub const OA_MENU_ADD_CONDITIONAL: &str = "https://api.weixin.qq.com/cgi-bin/menu/addconditional";
pub const OA_MENU_TRY_MATCH: &str = "https://api.weixin.qq.com/cgi-bin/menu/trymatch";
pub const OA_MENU_GET: &str = "https://api.weixin.qq.com/cgi-bin/menu/get";
pub const OA_MENU_DELETE: &str = "https://api.weixin.qq.com/cgi-bin/menu/delete";
pub const OA_MENU_DELETE_CONDITIONAL: &str = "https://api.weixin.qq.com/cgi-bin/menu/delconditional";

// WeCom
pub const CORP_ACCESS_TOKEN: &str = "https://qyapi.weixin.qq.com/cgi-bin/gettoken";
pub const CORP_OAUTH2_AUTHORIZE: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";
pub const CORP_QRCODE_AUTHORIZE: &str = "https://open.work.weixin.qq.com/wwopen/sso/qrConnect";
pub const CORP_AGENT_GET: &str = "https://qyapi.weixin.qq.com/cgi-bin/agent/get";
pub const CORP_AGENT_LIST: &str = "https://qyapi.weixin.qq.com/cgi-bin/agent/list";
pub const CORP_AGENT_SET: &str = "https://qyapi.weixin.qq.com/cgi-bin/agent/set";
pub const CORP_MEDIA_UPLOAD: &str = "https://qyapi.weixin.qq.com/cgi-bin/media/upload";

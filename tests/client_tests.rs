//! Platform clients: token acquisition, sign-in URLs and callback crypto.

mod common;

use std::sync::Arc;

use common::MockHttpClient;
use http::Method;
use wechat_open_sdk::api::agent::{self, AgentGetResult};
use wechat_open_sdk::api::media::{self, MediaType, MediaUploadResult};
use wechat_open_sdk::crypto;
use wechat_open_sdk::types::AuthScope;
use wechat_open_sdk::{Corp, Oa, WechatError};

const CORP_ID: &str = "ww1234567890abcdef";
const AES_KEY: &str = "jWmYm7qr5nMoAUwZRjGtBxmz3KA1tkAj3ykkR6q2B2C";

fn corp_with(mock: Arc<MockHttpClient>) -> Corp {
    Corp::builder(CORP_ID)
        .server_config("QDG6eK", AES_KEY)
        .http_client(mock)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_corp_access_token() {
    let mock = Arc::new(
        MockHttpClient::new()
            .reply(r#"{"errcode":0,"errmsg":"ok","access_token":"accesstoken000001","expires_in":7200}"#),
    );
    let corp = corp_with(mock.clone());

    let token = corp.access_token("SECRET", &[]).await.unwrap();

    assert_eq!(token.as_str(), "accesstoken000001");
    assert_eq!(token.expires_in, 7200);

    let calls = mock.calls();
    assert_eq!(calls[0].method(), Method::GET);
    assert_eq!(
        calls[0].url(),
        "https://qyapi.weixin.qq.com/cgi-bin/gettoken?corpid=ww1234567890abcdef&corpsecret=SECRET"
    );
}

#[tokio::test]
async fn test_oa_access_token() {
    let mock = Arc::new(
        MockHttpClient::new().reply(r#"{"access_token":"ACCESS_TOKEN","expires_in":7200}"#),
    );
    let oa = Oa::builder("wx1234567890abcdef", "APPSECRET")
        .http_client(mock.clone())
        .build()
        .unwrap();

    let token = oa.access_token(&[]).await.unwrap();

    assert_eq!(token.as_str(), "ACCESS_TOKEN");
    assert_eq!(
        mock.calls()[0].url(),
        "https://api.weixin.qq.com/cgi-bin/token?grant_type=client_credential\
         &appid=wx1234567890abcdef&secret=APPSECRET"
    );
}

#[tokio::test]
async fn test_access_token_api_error() {
    let mock = Arc::new(MockHttpClient::new().reply(r#"{"errcode":40001,"errmsg":"invalid credential"}"#));
    let corp = corp_with(mock);

    let err = corp.access_token("WRONG", &[]).await.unwrap_err();
    assert!(matches!(err, WechatError::Api { code: 40001, .. }));
}

#[tokio::test]
async fn test_corp_agent_get() {
    let mock = Arc::new(
        MockHttpClient::new().reply(r#"{"errcode":0,"errmsg":"ok","agentid":1000005,"name":"HR"}"#),
    );
    let corp = corp_with(mock.clone());

    let mut result = AgentGetResult::default();
    corp.execute("T", agent::agent_get("1000005", &mut result), &[])
        .await
        .unwrap();

    assert_eq!(result.agent_id, "1000005");
    assert_eq!(result.name, "HR");
    assert_eq!(
        mock.calls()[0].url(),
        "https://qyapi.weixin.qq.com/cgi-bin/agent/get?access_token=T&agentid=1000005"
    );
}

#[tokio::test]
async fn test_corp_media_upload() {
    let mock = Arc::new(MockHttpClient::new().reply(
        r#"{"errcode":0,"errmsg":"","type":"image","media_id":"MEDIA","created_at":"1380000000"}"#,
    ));
    let corp = corp_with(mock.clone());

    let mut result = MediaUploadResult::default();
    corp.execute(
        "T",
        media::upload_media(MediaType::Image, "a.jpg", b"jpg".to_vec(), &mut result),
        &[],
    )
    .await
    .unwrap();

    assert_eq!(result.media_id, "MEDIA");
    match &mock.calls()[0] {
        common::Call::Upload { url, form, .. } => {
            assert_eq!(
                url,
                "https://qyapi.weixin.qq.com/cgi-bin/media/upload?access_token=T&type=image"
            );
            assert_eq!(form.file_field, "media");
            assert_eq!(form.file_name, "a.jpg");
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn test_corp_sign_in_urls() {
    let corp = Corp::builder(CORP_ID).build().unwrap();

    assert_eq!(
        corp.oauth2_url(AuthScope::SnsapiBase, "https://a.com/cb", "xyz"),
        "https://open.weixin.qq.com/connect/oauth2/authorize?appid=ww1234567890abcdef\
         &redirect_uri=https%3A%2F%2Fa%2Ecom%2Fcb&response_type=code\
         &scope=snsapi_base&state=xyz#wechat_redirect"
    );
    assert_eq!(
        corp.qrcode_auth_url("1000005", "https://a.com/cb", "xyz"),
        "https://open.work.weixin.qq.com/wwopen/sso/qrConnect?appid=ww1234567890abcdef\
         &agentid=1000005&redirect_uri=https%3A%2F%2Fa%2Ecom%2Fcb&state=xyz"
    );
}

#[test]
fn test_corp_callback_roundtrip() {
    let corp = corp_with(Arc::new(MockHttpClient::new()));
    let xml = b"<xml><ToUserName><![CDATA[ww1234567890abcdef]]></ToUserName></xml>";

    let encrypted = crypto::encrypt(CORP_ID, AES_KEY, b"0123456789abcdef", xml).unwrap();
    let signature = crypto::sign_with_sha1("QDG6eK", &["1409659813", "1372623149", &encrypted]);

    assert!(corp.verify_event_sign(&signature, &["1409659813", "1372623149", &encrypted]));
    assert!(!corp.verify_event_sign(&signature, &["1409659814", "1372623149", &encrypted]));
    assert_eq!(corp.decrypt_event_message(&encrypted).unwrap(), xml.to_vec());
}

#[test]
fn test_callback_for_other_receiver_is_rejected() {
    let corp = corp_with(Arc::new(MockHttpClient::new()));
    let encrypted = crypto::encrypt("ww_other", AES_KEY, b"0123456789abcdef", b"<xml/>").unwrap();

    assert!(matches!(
        corp.decrypt_event_message(&encrypted),
        Err(WechatError::Crypto(_))
    ));
}

#[test]
fn test_callback_without_server_config() {
    let corp = Corp::builder(CORP_ID).build().unwrap();

    assert!(!corp.verify_event_sign("anything", &["1", "2", "3"]));
    assert!(matches!(
        corp.decrypt_event_message("AAAA"),
        Err(WechatError::Config(_))
    ));
}

#[test]
fn test_oa_callback_uses_appid_as_receiver() {
    let oa = Oa::builder("wx1234567890abcdef", "secret")
        .server_config("token", AES_KEY)
        .build()
        .unwrap();
    let encrypted =
        crypto::encrypt("wx1234567890abcdef", AES_KEY, b"0123456789abcdef", b"hello").unwrap();

    assert_eq!(oa.decrypt_event_message(&encrypted).unwrap(), b"hello".to_vec());
}

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::{Request, Response};
use tower::{Layer, Service};

/// Tower layer logging every outgoing request with credentials redacted.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at debug level with status text instead of one info line.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "secret",
    "appsecret",
    "corpsecret",
    "encoding_aes_key",
    "token",
    "code",
];

/// Replace the values of credential-bearing query parameters with `[REDACTED]`.
pub(crate) fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let redacted: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some((key, _)) if SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                format!("{key}=[REDACTED]")
            }
            _ => param.to_string(),
        })
        .collect();

    format!("{base}?{}", redacted.join("&"))
}

fn status_text(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

fn log_request(method: &str, url: &str, verbose: bool) {
    if verbose {
        debug!("[wechat] >>> {} {}", method, url);
    }
}

fn log_response(method: &str, url: &str, status: u16, elapsed: Duration, verbose: bool) {
    if verbose {
        debug!(
            "[wechat] <<< {} {} {} {} ({:?})",
            method,
            url,
            status,
            status_text(status),
            elapsed
        );
    } else {
        info!("[wechat] {} {} -> {} ({:?})", method, url, status, elapsed);
    }
}

impl<S, E> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = E> + Send + Clone + 'static,
    S::Future: Send,
    E: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = E;
    type Future = Pin<Box<dyn Future<Output = Result<Response, E>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), E>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().clone();
        let url = redact_url(req.url().as_str());
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            log_request(method.as_str(), &url, verbose);
            let started = Instant::now();

            match inner.call(req).await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    log_response(method.as_str(), &url, status, started.elapsed(), verbose);
                    Ok(response)
                }
                Err(err) => {
                    warn!(
                        "[wechat] {} {} failed after {:?}: {}",
                        method,
                        url,
                        started.elapsed(),
                        err
                    );
                    Err(err)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn test_redact_url_keeps_plain_params() {
        let url = "https://qyapi.weixin.qq.com/cgi-bin/media/upload?type=image";
        assert_eq!(redact_url(url), url);
    }

    #[test]
    fn test_redact_url_without_query() {
        let url = "https://api.weixin.qq.com/cgi-bin/menu/get";
        assert_eq!(redact_url(url), url);
    }

    #[test]
    fn test_redact_url_with_access_token() {
        let url = "https://api.weixin.qq.com/cgi-bin/menu/get?access_token=abc123&agentid=1";
        assert_eq!(
            redact_url(url),
            "https://api.weixin.qq.com/cgi-bin/menu/get?access_token=[REDACTED]&agentid=1"
        );
    }

    #[test]
    fn test_redact_url_with_corp_secret() {
        let url = "https://qyapi.weixin.qq.com/cgi-bin/gettoken?corpid=ww1&corpsecret=s3cr3t";
        let redacted = redact_url(url);
        assert_eq!(
            redacted,
            "https://qyapi.weixin.qq.com/cgi-bin/gettoken?corpid=ww1&corpsecret=[REDACTED]"
        );
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(status_text(200), "OK");
        assert_eq!(status_text(400), "Bad Request");
        assert_eq!(status_text(503), "Service Unavailable");
        assert_eq!(status_text(999), "");
    }

    #[tokio::test]
    async fn test_service_returns_inner_response() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let peer = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 2048];
            let n = stream.read(&mut request).await.unwrap();
            let body = r#"{"errcode":0,"errmsg":"ok"}"#;
            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request[..n]).into_owned()
        });

        let http = Client::new();
        let mut service = LoggingMiddleware::new().layer(http.clone());
        let request = http
            .get(format!("http://{addr}/cgi-bin/agent/list?access_token=T0KEN"))
            .build()
            .unwrap();

        let response = service.call(request).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), r#"{"errcode":0,"errmsg":"ok"}"#);

        // redaction only affects log lines, never the request itself
        let seen = peer.await.unwrap();
        assert!(seen.starts_with("GET /cgi-bin/agent/list?access_token=T0KEN "));
    }
}

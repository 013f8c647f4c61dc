//! Middleware components for the default HTTP transport.
//!
//! The [`ReqwestHttpClient`](crate::client::ReqwestHttpClient) sends every
//! request through these tower layers.
//!
//! - [`LoggingMiddleware`] - Logs request/response information

pub use tower::{Layer, Service};

mod logging;

pub(crate) use logging::redact_url;
pub use logging::{LoggingMiddleware, LoggingMiddlewareService};

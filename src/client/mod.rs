//! Clients, dispatcher and transport
//!
//! - [`Corp`] / [`Oa`] - platform clients holding credentials and a transport
//! - [`Dispatcher`] - runs an [`Action`](crate::action::Action) and applies the envelope contract
//! - [`HttpClient`] - injectable transport, [`ReqwestHttpClient`] by default

mod builder;
pub use builder::{CorpBuilder, OaBuilder};

mod corp;
pub use corp::Corp;

mod dispatcher;
pub use dispatcher::Dispatcher;

mod transport;
pub use transport::{HttpClient, HttpOption, ReqwestHttpClient, ReqwestHttpClientBuilder, UploadForm};

mod oa;
pub use oa::Oa;

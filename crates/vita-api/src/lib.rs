//! Authenticated access to the VitaLedger backend.
//!
//! [`ApiClient`] is the single request wrapper every page goes through: it
//! attaches the stored bearer token, detects session expiry (401 → clear
//! credentials, navigate to login) and surfaces everything else to the
//! caller untouched. The transport and the navigation side effect are
//! injected capabilities so tests can run without a network or a shell.

mod client;
mod error;
mod http;
mod identity;
mod navigator;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
pub use identity::IdentityClient;
pub use navigator::{LOGIN_PATH, LogNavigator, Navigator, SESSION_EXPIRED_NOTICE};

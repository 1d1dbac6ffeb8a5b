use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::TransportError;

/// A fully assembled outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A raw backend response. Status interpretation is the caller's job;
/// only 401 is handled by the wrapper itself.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The backend's `detail` message, when the error body carries one.
    pub fn error_detail(&self) -> Option<String> {
        self.json::<ErrorBody>().ok().map(|body| body.detail)
    }

    /// Turn a non-2xx response into an [`ApiError`](crate::ApiError) using
    /// the backend's `detail` message when present, else `fallback`.
    pub fn into_error(self, fallback: &str) -> crate::ApiError {
        let detail = self
            .error_detail()
            .unwrap_or_else(|| fallback.to_owned());
        crate::ApiError::api(self.status, detail)
    }
}

/// The transport capability the wrapper runs on.
///
/// Production uses [`ReqwestClient`]; tests substitute fakes returning
/// canned responses or transport failures.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport. No retries and no wrapper-level timeout;
/// callers bound latency through the cancellation token they supply.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::error!(error = %err, "request failed to reach the backend");
            TransportError::from(err)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::from)?;

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

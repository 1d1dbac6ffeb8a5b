use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;
use vita_session::SessionStore;
use vita_settings::AppSettings;

use crate::error::ApiError;
use crate::http::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
use crate::navigator::{LOGIN_PATH, Navigator, SESSION_EXPIRED_NOTICE};

/// Per-request options. Defaults to an authenticated GET with no extra
/// headers, no body and no cancellation.
#[derive(Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub cancel: Option<CancellationToken>,
    pub unauthenticated: bool,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    pub fn put() -> Self {
        Self {
            method: Method::PUT,
            ..Self::default()
        }
    }

    /// Serialize `body` as the JSON request body.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn raw_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a caller header. Caller headers win over the wrapper defaults,
    /// which is how uploads replace the JSON content type.
    pub fn header(
        mut self,
        name: HeaderName,
        value: impl AsRef<str>,
    ) -> Result<Self, http::header::InvalidHeaderValue> {
        self.headers
            .insert(name, HeaderValue::from_str(value.as_ref())?);
        Ok(self)
    }

    /// Cancel the call when `token` fires. The outcome is
    /// [`ApiError::Cancelled`], distinct from a transport failure.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Send without the stored bearer token and without expiry handling.
    ///
    /// The login and registration calls use this: a 401 from them means
    /// wrong credentials and comes back raw with its `detail` message,
    /// not a cleared session and a redirect.
    pub fn unauthenticated(mut self) -> Self {
        self.unauthenticated = true;
        self
    }
}

/// The request wrapper every page goes through.
///
/// Joins paths onto one configured base URL, attaches the stored bearer
/// token, and converts a 401 into "clear session, navigate to login". All
/// other statuses are returned raw for the caller to interpret. Never
/// retries.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    base_url: Url,
}

impl ApiClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        base_url: Url,
    ) -> Self {
        Self {
            http,
            store,
            navigator,
            base_url,
        }
    }

    /// Production wiring: reqwest transport, endpoint from settings.
    pub fn from_settings(
        settings: &AppSettings,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.api.endpoint)?;
        Ok(Self::new(
            Arc::new(ReqwestClient::new()),
            store,
            navigator,
            base_url,
        ))
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Issue a wrapped request for `path`, a rooted path (`/auth/me`)
    /// appended to the configured endpoint. Path segments of the endpoint
    /// are preserved: `/subscriptions/me` on `https://host/api` hits
    /// `/api/subscriptions/me`.
    ///
    /// On 401 the session is cleared, navigation to login is triggered and
    /// the call fails with [`ApiError::Unauthorized`]; the body must not be
    /// read after that. Every other response comes back untouched.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let url = self.endpoint_url(path);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !options.unauthenticated {
            if let Some(token) = self.store.token() {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {token}"))?,
                );
            }
        }
        for (name, value) in options.headers.iter() {
            headers.insert(name, value.clone());
        }

        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        };

        let response = match options.cancel {
            Some(cancel) => {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!(path, "request cancelled by caller");
                        return Err(ApiError::Cancelled);
                    }
                    result = self.http.execute(request) => result?,
                }
            }
            None => self.http.execute(request).await?,
        };

        if response.status == http::StatusCode::UNAUTHORIZED && !options.unauthenticated {
            tracing::warn!(path, "session rejected by backend, signing out");
            self.expire_session();
            return Err(ApiError::Unauthorized);
        }

        Ok(response)
    }

    fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!(
            "{}{}",
            self.base_url.path().trim_end_matches('/'),
            path
        ));
        url
    }

    pub async fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<HttpResponse, ApiError> {
        self.request(path, RequestOptions::post().json_body(body)?)
            .await
    }

    /// POST with an empty body (the portal and cancel endpoints).
    pub async fn post_empty(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.request(path, RequestOptions::post()).await
    }

    pub async fn put_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<HttpResponse, ApiError> {
        self.request(path, RequestOptions::put().json_body(body)?)
            .await
    }

    /// Clear the session and send the user back to login.
    ///
    /// Idempotent; a second expiry repeats the (harmless) navigation. A
    /// store failure is logged but never blocks the redirect.
    pub fn expire_session(&self) {
        if let Err(err) = self.store.clear_session() {
            tracing::error!(error = %err, "failed to clear session on expiry");
        }
        self.navigator
            .navigate(LOGIN_PATH, Some(SESSION_EXPIRED_NOTICE));
    }
}

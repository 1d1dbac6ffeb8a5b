//! Subscription lifecycle client against a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use url::Url;
use vita_api::{
    ApiClient, ApiError, HttpClient, HttpRequest, HttpResponse, LogNavigator, TransportError,
};
use vita_billing::{Plan, SubscriptionClient};
use vita_session::{MemorySessionStore, SessionStore, UserProfile};

#[derive(Default)]
struct ScriptedHttp {
    script: Mutex<VecDeque<HttpResponse>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttp {
    fn new(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(responses.into()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request"))
    }
}

fn json(status: StatusCode, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HeaderMap::new(),
        body: body.as_bytes().to_vec(),
    }
}

fn subscriptions(http: Arc<dyn HttpClient>) -> SubscriptionClient {
    let store = Arc::new(MemorySessionStore::new());
    store
        .set_session("tok-billing", &UserProfile::default())
        .unwrap();
    SubscriptionClient::new(ApiClient::new(
        http,
        store,
        Arc::new(LogNavigator),
        Url::parse("http://localhost:8000").unwrap(),
    ))
}

const ACTIVE_PLUS: &str = r#"{
    "status": "active",
    "plan": "plus",
    "period": "monthly",
    "is_trial": false
}"#;

#[tokio::test]
async fn my_subscription_parses_the_record() {
    let http = ScriptedHttp::new(vec![json(StatusCode::OK, ACTIVE_PLUS)]);
    let client = subscriptions(http.clone());

    let sub = client.my_subscription().await.unwrap();
    assert_eq!(sub.status, "active");
    assert_eq!(sub.plan, "plus");
    assert_eq!(sub.period, "monthly");
    assert!(sub.trial_ends_at.is_none());

    let seen = http.seen.lock().unwrap();
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].url.path(), "/subscriptions/me");
}

#[tokio::test]
async fn my_subscription_failure_uses_the_fixed_message() {
    // This endpoint never surfaces the backend detail.
    let http = ScriptedHttp::new(vec![json(
        StatusCode::NOT_FOUND,
        r#"{"detail": "No subscription"}"#,
    )]);
    let client = subscriptions(http);

    let err = client.my_subscription().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch subscription");
}

#[tokio::test]
async fn create_posts_the_selection_and_returns_the_checkout_url() {
    let http = ScriptedHttp::new(vec![json(
        StatusCode::OK,
        r#"{"checkout_url": "https://pay.example.com/cs_123"}"#,
    )]);
    let client = subscriptions(http.clone());

    let checkout = client.create(Plan::Pro, "yearly").await.unwrap();
    assert_eq!(checkout.checkout_url, "https://pay.example.com/cs_123");

    let seen = http.seen.lock().unwrap();
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].url.path(), "/subscriptions/create");
    let body: serde_json::Value =
        serde_json::from_slice(seen[0].body.as_ref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"plan": "pro", "period": "yearly"}));
}

#[tokio::test]
async fn create_failure_surfaces_the_backend_detail() {
    let http = ScriptedHttp::new(vec![json(
        StatusCode::CONFLICT,
        r#"{"detail": "Already subscribed"}"#,
    )]);
    let client = subscriptions(http);

    let err = client.create(Plan::Basic, "monthly").await.unwrap_err();
    assert_eq!(err.to_string(), "Already subscribed");
}

#[tokio::test]
async fn portal_posts_an_empty_body() {
    let http = ScriptedHttp::new(vec![json(
        StatusCode::OK,
        r#"{"url": "https://billing.example.com/p_1"}"#,
    )]);
    let client = subscriptions(http.clone());

    let portal = client.portal().await.unwrap();
    assert_eq!(portal.url, "https://billing.example.com/p_1");

    let seen = http.seen.lock().unwrap();
    assert_eq!(seen[0].method, Method::POST);
    assert!(seen[0].body.is_none());
}

#[tokio::test]
async fn cancel_returns_the_updated_record() {
    let http = ScriptedHttp::new(vec![json(
        StatusCode::OK,
        r#"{"status": "canceled", "plan": "plus", "period": "monthly"}"#,
    )]);
    let client = subscriptions(http);

    let sub = client.cancel().await.unwrap();
    assert_eq!(sub.status, "canceled");
}

#[tokio::test]
async fn cancel_failure_falls_back_without_a_detail_body() {
    let http = ScriptedHttp::new(vec![json(StatusCode::INTERNAL_SERVER_ERROR, "boom")]);
    let client = subscriptions(http);

    let err = client.cancel().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to cancel subscription");
}

#[tokio::test]
async fn mock_activate_returns_the_activated_record() {
    let http = ScriptedHttp::new(vec![json(
        StatusCode::OK,
        r#"{"status": "active", "plan": "basic", "period": "weekly"}"#,
    )]);
    let client = subscriptions(http.clone());

    let sub = client.mock_activate(Plan::Basic, "weekly").await.unwrap();
    assert_eq!(sub.status, "active");
    assert_eq!(sub.plan, "basic");

    let seen = http.seen.lock().unwrap();
    assert_eq!(seen[0].url.path(), "/subscriptions/mock/activate");
}

#[tokio::test]
async fn unauthorized_billing_call_fails_as_unauthorized() {
    let http = ScriptedHttp::new(vec![json(StatusCode::UNAUTHORIZED, "")]);
    let client = subscriptions(http);

    let err = client.my_subscription().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

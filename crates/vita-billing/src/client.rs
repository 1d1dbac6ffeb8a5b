use vita_api::{ApiClient, ApiError};

use crate::types::{CheckoutSession, Plan, PlanSelection, PortalSession, Subscription};

/// Typed calls against the `/subscriptions` endpoints, all routed through
/// the request wrapper (bearer auth and 401 handling included).
#[derive(Clone)]
pub struct SubscriptionClient {
    api: ApiClient,
}

impl SubscriptionClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The caller's current subscription.
    pub async fn my_subscription(&self) -> Result<Subscription, ApiError> {
        let response = self.api.get("/subscriptions/me").await?;
        if !response.is_success() {
            return Err(ApiError::api(
                response.status,
                "Failed to fetch subscription",
            ));
        }
        Ok(response.json()?)
    }

    /// Start a checkout for `plan` billed per `period`. The caller opens
    /// the returned URL in the external checkout flow.
    pub async fn create(&self, plan: Plan, period: &str) -> Result<CheckoutSession, ApiError> {
        let body = PlanSelection {
            plan: plan.as_str(),
            period,
        };
        let response = self.api.post_json("/subscriptions/create", &body).await?;
        if !response.is_success() {
            tracing::error!(status = %response.status, "subscription checkout failed");
            return Err(response.into_error("Failed to create subscription"));
        }
        Ok(response.json()?)
    }

    /// Open the billing portal; the caller shows the URL in a new context.
    pub async fn portal(&self) -> Result<PortalSession, ApiError> {
        let response = self.api.post_empty("/subscriptions/portal").await?;
        if !response.is_success() {
            return Err(ApiError::api(response.status, "Failed to open portal"));
        }
        Ok(response.json()?)
    }

    /// Cancel the current subscription; returns the updated record.
    pub async fn cancel(&self) -> Result<Subscription, ApiError> {
        let response = self.api.post_empty("/subscriptions/cancel").await?;
        if !response.is_success() {
            tracing::error!(status = %response.status, "subscription cancel failed");
            return Err(response.into_error("Failed to cancel subscription"));
        }
        Ok(response.json()?)
    }

    /// Activate a subscription without payment. Only exists on mock-mode
    /// deployments; callers gate on the billing mode flag from
    /// `vita-settings`.
    pub async fn mock_activate(&self, plan: Plan, period: &str) -> Result<Subscription, ApiError> {
        let body = PlanSelection {
            plan: plan.as_str(),
            period,
        };
        let response = self
            .api
            .post_json("/subscriptions/mock/activate", &body)
            .await?;
        if !response.is_success() {
            return Err(ApiError::api(
                response.status,
                "Failed to activate subscription",
            ));
        }
        Ok(response.json()?)
    }
}

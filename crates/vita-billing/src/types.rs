use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The subscription record as the backend reports it.
///
/// Never persisted client-side; billing pages fetch it fresh per load.
/// `status` and `plan` stay open strings — the server owns that vocabulary
/// and the evaluator treats anything unrecognized as granting nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub status: String,
    pub plan: String,
    pub period: String,
    #[serde(default)]
    pub is_trial: bool,
    #[serde(default)]
    pub trial_ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// The plan tiers a feature can require, in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Plus,
    Pro,
}

impl Plan {
    /// Total order basic(1) < plus(2) < pro(3), used only for comparison.
    pub fn rank(self) -> u8 {
        match self {
            Plan::Basic => 1,
            Plan::Plus => 2,
            Plan::Pro => 3,
        }
    }

    /// Rank of a server-reported plan string; `None` for anything
    /// unrecognized, which never grants access.
    pub fn rank_of(plan: &str) -> Option<u8> {
        match plan {
            "basic" => Some(1),
            "plus" => Some(2),
            "pro" => Some(3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Plus => "plus",
            Plan::Pro => "pro",
        }
    }
}

/// Response of `/subscriptions/create`; the caller opens the URL in an
/// external checkout flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

/// Response of `/subscriptions/portal`; the caller opens the URL in a new
/// context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSession {
    pub url: String,
}

#[derive(Serialize)]
pub(crate) struct PlanSelection<'a> {
    pub plan: &'a str,
    pub period: &'a str,
}

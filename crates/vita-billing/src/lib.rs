//! Plan entitlements and the subscription lifecycle client.
//!
//! The evaluator is pure and authoritative for UI gating: a trial that has
//! passed its end timestamp grants nothing even while the server record
//! still says `trial`.

mod client;
mod entitlements;
mod types;

pub use client::SubscriptionClient;
pub use entitlements::{format_period, has_access, has_access_at, plan_color};
pub use types::{CheckoutSession, Plan, PortalSession, Subscription};

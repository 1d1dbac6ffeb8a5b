use chrono::{DateTime, Utc};

use crate::types::{Plan, Subscription};

/// Whether `subscription` grants access to a feature requiring `min_plan`.
///
/// Pure and cheap enough to call on every render. The evaluator, not the
/// server record, is authoritative: an `is_trial` subscription past its
/// `trial_ends_at` grants nothing even while `status` still reads `trial`.
pub fn has_access(subscription: Option<&Subscription>, min_plan: Plan) -> bool {
    has_access_at(subscription, min_plan, Utc::now())
}

/// [`has_access`] at an explicit evaluation instant.
pub fn has_access_at(
    subscription: Option<&Subscription>,
    min_plan: Plan,
    now: DateTime<Utc>,
) -> bool {
    let Some(sub) = subscription else {
        return false;
    };
    if sub.status != "active" && sub.status != "trial" {
        return false;
    }
    if sub.is_trial {
        if let Some(trial_end) = sub.trial_ends_at {
            if now > trial_end {
                return false;
            }
        }
    }
    // Unrecognized plan strings have no rank and grant nothing.
    match Plan::rank_of(&sub.plan) {
        Some(rank) => rank >= min_plan.rank(),
        None => false,
    }
}

/// Fixed tier color tokens, with a neutral default for unknown plans.
pub fn plan_color(plan: &str) -> &'static str {
    match plan {
        "basic" => "#10b981",
        "plus" => "#8b5cf6",
        "pro" => "#f59e0b",
        _ => "#64748b",
    }
}

/// Capitalize the first character of a billing period for display:
/// `monthly` → `Monthly`.
pub fn format_period(period: &str) -> String {
    let mut chars = period.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn subscription(status: &str, plan: &str) -> Subscription {
        Subscription {
            status: status.to_owned(),
            plan: plan.to_owned(),
            period: "monthly".to_owned(),
            is_trial: false,
            trial_ends_at: None,
            ends_at: None,
        }
    }

    #[test]
    fn absent_subscription_grants_nothing() {
        assert!(!has_access(None, Plan::Basic));
    }

    #[test]
    fn canceled_status_grants_nothing_regardless_of_plan() {
        for plan in ["basic", "plus", "pro"] {
            assert!(!has_access(Some(&subscription("canceled", plan)), Plan::Basic));
        }
    }

    #[test]
    fn unknown_status_grants_nothing() {
        assert!(!has_access(Some(&subscription("past_due", "pro")), Plan::Basic));
    }

    #[test]
    fn active_plan_rank_grid() {
        let plans = [("basic", 1u8), ("plus", 2), ("pro", 3)];
        let mins = [(Plan::Basic, 1u8), (Plan::Plus, 2), (Plan::Pro, 3)];
        for (plan, plan_rank) in plans {
            for (min_plan, min_rank) in mins {
                assert_eq!(
                    has_access(Some(&subscription("active", plan)), min_plan),
                    plan_rank >= min_rank,
                    "plan={plan} min={min_plan:?}",
                );
            }
        }
    }

    #[test]
    fn unrecognized_plan_never_grants() {
        assert!(!has_access(
            Some(&subscription("active", "enterprise")),
            Plan::Basic
        ));
    }

    #[test]
    fn expired_trial_grants_nothing_even_while_status_reads_trial() {
        let now = Utc::now();
        let mut sub = subscription("trial", "pro");
        sub.is_trial = true;
        sub.trial_ends_at = Some(now - Duration::hours(1));
        assert!(!has_access_at(Some(&sub), Plan::Basic, now));
    }

    #[test]
    fn running_trial_grants_by_rank() {
        let now = Utc::now();
        let mut sub = subscription("trial", "plus");
        sub.is_trial = true;
        sub.trial_ends_at = Some(now + Duration::days(3));
        assert!(has_access_at(Some(&sub), Plan::Plus, now));
        assert!(!has_access_at(Some(&sub), Plan::Pro, now));
    }

    #[test]
    fn trial_without_end_timestamp_falls_through_to_rank() {
        // Server invariant says is_trial implies trial_ends_at, but the
        // evaluator must not crash when the record violates it.
        let mut sub = subscription("trial", "basic");
        sub.is_trial = true;
        assert!(has_access(Some(&sub), Plan::Basic));
    }

    #[test]
    fn plan_colors_are_fixed_with_a_neutral_default() {
        assert_eq!(plan_color("basic"), "#10b981");
        assert_eq!(plan_color("plus"), "#8b5cf6");
        assert_eq!(plan_color("pro"), "#f59e0b");
        assert_eq!(plan_color("enterprise"), "#64748b");
    }

    #[test]
    fn format_period_capitalizes_the_first_character() {
        assert_eq!(format_period("monthly"), "Monthly");
        assert_eq!(format_period("yearly"), "Yearly");
        assert_eq!(format_period("weekly"), "Weekly");
        assert_eq!(format_period(""), "");
    }
}

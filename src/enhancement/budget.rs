/*!
 * AI budget gate.
 *
 * Unlimited subscribers spend a monthly credit balance; everyone else spends
 * the per-profile API cost limit. A denied check always means the section
 * falls back to its template.
 */

use serde::Serialize;

use crate::app_config::{BillingConfig, SectionAiConfig};
use crate::database::models::{PlanType, SubscriptionRecord, UserProfileRecord};

/// Outcome of a budget check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetCheck {
    Allowed {
        plan_type: PlanType,
        remaining_budget: f64,
        estimated_cost: f64,
        /// Rough count of fully enhanced documents left, metered plans only
        remaining_docs: Option<u64>,
        warning: Option<String>,
    },
    Denied {
        reason: String,
        remaining_budget: f64,
        estimated_cost: Option<f64>,
        upgrade_prompt: Option<String>,
    },
}

impl BudgetCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, BudgetCheck::Allowed { .. })
    }

    fn denied(reason: &str) -> Self {
        BudgetCheck::Denied {
            reason: reason.to_string(),
            remaining_budget: 0.0,
            estimated_cost: None,
            upgrade_prompt: None,
        }
    }
}

/// Upgrade message shown when a metered plan runs dry
pub fn upgrade_prompt(plan: PlanType, profile_limit: f64, billing: &BillingConfig) -> String {
    match plan {
        PlanType::Free => format!(
            "You've reached your free tier AI limit (${:.2}). Upgrade to Unlimited (${}/month) for AI-enhanced documents with ${}/month AI credit, or switch to Pay Per Document (${} each) for professional templates.",
            profile_limit,
            billing.price_unlimited,
            billing.unlimited_monthly_credit,
            billing.price_pay_per_doc
        ),
        PlanType::PayPerDoc => format!(
            "You've reached your AI budget limit. Upgrade to Unlimited (${}/month) for AI-enhanced documents with ${}/month AI credit!",
            billing.price_unlimited, billing.unlimited_monthly_credit
        ),
        PlanType::Unlimited => "AI budget exhausted. Please contact support.".to_string(),
    }
}

/// Decide whether one section may be sent to the model.
///
/// `section` is `None` when AI is switched off for the section type.
pub fn evaluate_budget(
    section: Option<&SectionAiConfig>,
    subscription: Option<&SubscriptionRecord>,
    profile: Option<&UserProfileRecord>,
    billing: &BillingConfig,
) -> BudgetCheck {
    let Some(section) = section else {
        return BudgetCheck::denied("AI not enabled for this section type");
    };
    let (Some(subscription), Some(profile)) = (subscription, profile) else {
        return BudgetCheck::denied("User subscription not found");
    };
    let estimated_cost = section.estimated_cost;

    if subscription.plan_type == PlanType::Unlimited && subscription.is_active {
        let balance = subscription.api_credit_balance;
        return if balance >= estimated_cost {
            BudgetCheck::Allowed {
                plan_type: PlanType::Unlimited,
                remaining_budget: balance,
                estimated_cost,
                remaining_docs: None,
                warning: None,
            }
        } else {
            BudgetCheck::Denied {
                reason: "Monthly API credit exhausted".to_string(),
                remaining_budget: balance,
                estimated_cost: Some(estimated_cost),
                upgrade_prompt: Some(format!(
                    "You've used your ${:.2}/month AI credit. More credit will be added next month.",
                    subscription.monthly_credit_amount
                )),
            }
        };
    }

    let remaining = profile.remaining_api_budget();
    if remaining < estimated_cost {
        return BudgetCheck::Denied {
            reason: "API budget limit reached".to_string(),
            remaining_budget: remaining,
            estimated_cost: Some(estimated_cost),
            upgrade_prompt: Some(upgrade_prompt(
                subscription.plan_type,
                profile.api_cost_limit,
                billing,
            )),
        };
    }

    let avg = billing.avg_cost_per_doc;
    let remaining_docs = if avg > 0.0 {
        (remaining / avg).floor() as u64
    } else {
        0
    };
    let warning = (remaining < avg * 2.0).then(|| {
        format!(
            "Low AI budget: Only ~{} AI-enhanced documents remaining. Upgrade to Unlimited for ${}/month AI credit!",
            remaining_docs, billing.unlimited_monthly_credit
        )
    });

    BudgetCheck::Allowed {
        plan_type: subscription.plan_type,
        remaining_budget: remaining,
        estimated_cost,
        remaining_docs: Some(remaining_docs),
        warning,
    }
}

/*!
 * Plans, checkout discounts and referral codes.
 *
 * Payment collection itself lives outside this crate; what is modelled here is
 * the price a plan costs, the discount a code grants against that price, and
 * the lifecycle of user-owned referral codes.
 */

pub mod discount;
pub mod referral;

pub use discount::{DiscountQuote, DiscountService};
pub use referral::{ReferralCodeStats, ReferralService, normalize_referral_code, suggested_referral_codes};

use crate::app_config::BillingConfig;
use crate::database::models::PlanType;
use crate::errors::DiscountError;

/// Checkout price of a plan. The free tier cannot be purchased.
pub fn plan_price(plan: PlanType, billing: &BillingConfig) -> Result<f64, DiscountError> {
    match plan {
        PlanType::Free => Err(DiscountError::InvalidPlan),
        PlanType::PayPerDoc => Ok(billing.price_pay_per_doc),
        PlanType::Unlimited => Ok(billing.price_unlimited),
    }
}

/// Parse a plan name submitted at checkout
pub fn parse_plan(plan: &str) -> Result<PlanType, DiscountError> {
    match plan.parse::<PlanType>() {
        Ok(PlanType::Free) | Err(_) => Err(DiscountError::InvalidPlan),
        Ok(plan) => Ok(plan),
    }
}

/// Round a dollar amount to cents
pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `25` for whole amounts, `12.50` otherwise
pub(crate) fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planPrice_shouldComeFromConfig() {
        let billing = BillingConfig::default();
        assert_eq!(plan_price(PlanType::PayPerDoc, &billing), Ok(149.0));
        assert_eq!(plan_price(PlanType::Unlimited, &billing), Ok(499.0));
        assert_eq!(plan_price(PlanType::Free, &billing), Err(DiscountError::InvalidPlan));
    }

    #[test]
    fn test_parsePlan_withUnknownOrFreePlan_shouldReject() {
        assert_eq!(parse_plan("unlimited"), Ok(PlanType::Unlimited));
        assert_eq!(parse_plan("free"), Err(DiscountError::InvalidPlan));
        assert_eq!(parse_plan("gold"), Err(DiscountError::InvalidPlan));
    }

    #[test]
    fn test_formatAmount_shouldDropZeroCents() {
        assert_eq!(format_amount(25.0), "25");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(round_cents(37.254), 37.25);
    }
}

/*!
 * Discount code validation and redemption.
 *
 * A code is checked in a fixed order: active flag, start date, end date,
 * usage cap. The first failing check is what the user sees.
 */

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

use super::{format_amount, parse_plan, plan_price, round_cents};
use crate::app_config::BillingConfig;
use crate::database::models::{DiscountCodeRecord, DiscountType, PlanType};
use crate::database::Repository;
use crate::errors::{AppError, DiscountError};

impl DiscountCodeRecord {
    /// Whether the code can be applied at `now`
    pub fn is_valid(&self, now: DateTime<Utc>) -> Result<(), DiscountError> {
        if !self.is_active {
            return Err(DiscountError::Inactive);
        }
        if self.valid_from.is_some_and(|from| now < from) {
            return Err(DiscountError::NotYetValid);
        }
        if self.valid_until.is_some_and(|until| now > until) {
            return Err(DiscountError::Expired);
        }
        if self.max_uses.is_some_and(|max| self.times_used >= max) {
            return Err(DiscountError::MaxUsesReached);
        }
        Ok(())
    }

    /// Dollars taken off `price`, never more than the price itself
    pub fn calculate_discount(&self, price: f64) -> f64 {
        let amount = match self.discount_type {
            DiscountType::Percentage => price * self.discount_value / 100.0,
            DiscountType::Fixed => self.discount_value.min(price),
        };
        round_cents(amount.max(0.0))
    }

    /// "25% off" or "$10 off"
    pub fn display(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}% off", format_amount(self.discount_value)),
            DiscountType::Fixed => format!("${} off", format_amount(self.discount_value)),
        }
    }
}

/// Price breakdown for a plan with a code applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountQuote {
    /// Code as stored, whatever case the user typed
    pub code: String,
    pub plan_type: PlanType,
    pub plan_name: String,
    pub original_price: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub discount_display: String,
    pub message: String,
}

/// Applies discount codes to plan prices
#[derive(Debug, Clone)]
pub struct DiscountService {
    repo: Repository,
    billing: BillingConfig,
}

impl DiscountService {
    pub fn new(repo: Repository, billing: BillingConfig) -> Self {
        Self { repo, billing }
    }

    /// Price a plan with `code` applied, without consuming a use
    pub async fn validate_discount_code(&self, code: &str, plan: &str) -> Result<DiscountQuote, AppError> {
        self.quote_at(code, plan, Utc::now()).await
    }

    /// Validate and count one use of the code
    pub async fn redeem_discount_code(&self, code: &str, plan: &str) -> Result<DiscountQuote, AppError> {
        let (quote, code_id) = self.priced_code(code, plan, Utc::now()).await?;
        // The cap is checked again by the update itself, so concurrent
        // redemptions cannot push the count past it
        if !self.repo.redeem_code_use(code_id).await? {
            return Err(DiscountError::MaxUsesReached.into());
        }
        info!("Redeemed discount code {} for {}", quote.code, quote.plan_type);
        Ok(quote)
    }

    async fn quote_at(&self, code: &str, plan: &str, now: DateTime<Utc>) -> Result<DiscountQuote, AppError> {
        self.priced_code(code, plan, now).await.map(|(quote, _)| quote)
    }

    async fn priced_code(
        &self,
        code: &str,
        plan: &str,
        now: DateTime<Utc>,
    ) -> Result<(DiscountQuote, i64), AppError> {
        let typed = code.trim();
        if typed.is_empty() {
            return Err(DiscountError::EmptyCode.into());
        }
        let code = typed.to_uppercase();

        let plan_type = parse_plan(plan)?;
        let original_price = plan_price(plan_type, &self.billing)?;

        let record = self
            .repo
            .find_discount_code(&code)
            .await?
            .ok_or_else(|| DiscountError::NotFound(typed.to_string()))?;
        record.is_valid(now)?;

        let discount_amount = record.calculate_discount(original_price);
        let final_price = round_cents(original_price - discount_amount);
        let discount_display = record.display();
        debug!(
            "Code {} on {}: {:.2} - {:.2} = {:.2}",
            record.code, plan_type, original_price, discount_amount, final_price
        );

        let quote = DiscountQuote {
            message: format!("✓ Code applied! {}", discount_display),
            code: record.code,
            plan_type,
            plan_name: plan_type.display_name().to_string(),
            original_price,
            discount_amount,
            final_price,
            discount_display,
        };
        Ok((quote, record.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> (DiscountService, Repository) {
        let repo = Repository::new_in_memory().unwrap();
        (DiscountService::new(repo.clone(), BillingConfig::default()), repo)
    }

    fn expect_discount_error(result: Result<DiscountQuote, AppError>) -> DiscountError {
        match result {
            Err(AppError::Discount(e)) => e,
            other => panic!("expected discount error, got {:?}", other),
        }
    }

    #[test]
    fn test_isValid_shouldCheckInOrder() {
        let now = Utc::now();
        let mut code = DiscountCodeRecord::percentage("SAVE", 10.0);
        assert_eq!(code.is_valid(now), Ok(()));

        code.max_uses = Some(1);
        code.times_used = 1;
        assert_eq!(code.is_valid(now), Err(DiscountError::MaxUsesReached));

        code.valid_until = Some(now - Duration::days(1));
        assert_eq!(code.is_valid(now), Err(DiscountError::Expired));

        code.valid_from = Some(now + Duration::days(1));
        assert_eq!(code.is_valid(now), Err(DiscountError::NotYetValid));

        code.is_active = false;
        assert_eq!(code.is_valid(now), Err(DiscountError::Inactive));
    }

    #[test]
    fn test_calculateDiscount_shouldCapFixedAmounts() {
        assert_eq!(DiscountCodeRecord::percentage("P", 25.0).calculate_discount(149.0), 37.25);
        assert_eq!(DiscountCodeRecord::percentage("P", 33.0).calculate_discount(499.0), 164.67);
        assert_eq!(DiscountCodeRecord::fixed("F", 10.0).calculate_discount(149.0), 10.0);
        assert_eq!(DiscountCodeRecord::fixed("F", 500.0).calculate_discount(149.0), 149.0);
    }

    #[test]
    fn test_display_shouldDescribeDiscount() {
        assert_eq!(DiscountCodeRecord::percentage("P", 25.0).display(), "25% off");
        assert_eq!(DiscountCodeRecord::fixed("F", 10.0).display(), "$10 off");
        assert_eq!(DiscountCodeRecord::fixed("F", 7.5).display(), "$7.50 off");
    }

    #[tokio::test]
    async fn test_validate_withLowercaseCode_shouldQuoteCanonicalCode() {
        let (service, repo) = service();
        repo.create_discount_code(&DiscountCodeRecord::percentage("LAUNCH25", 25.0))
            .await
            .unwrap();

        let quote = service.validate_discount_code("  launch25 ", "pay_per_doc").await.unwrap();
        assert_eq!(quote.code, "LAUNCH25");
        assert_eq!(quote.plan_name, "Pay-Per-Document");
        assert_eq!(quote.original_price, 149.0);
        assert_eq!(quote.discount_amount, 37.25);
        assert_eq!(quote.final_price, 111.75);
        assert_eq!(quote.message, "✓ Code applied! 25% off");
    }

    #[tokio::test]
    async fn test_validate_withBadInput_shouldReturnMessages() {
        let (service, repo) = service();
        repo.create_discount_code(&DiscountCodeRecord::fixed("TEN", 10.0)).await.unwrap();

        let err = expect_discount_error(service.validate_discount_code("   ", "unlimited").await);
        assert_eq!(err.to_string(), "Please enter a discount code");

        let err = expect_discount_error(service.validate_discount_code("TEN", "free").await);
        assert_eq!(err, DiscountError::InvalidPlan);

        let err = expect_discount_error(service.validate_discount_code(" nope ", "unlimited").await);
        assert_eq!(err, DiscountError::NotFound("nope".to_string()));
        assert_eq!(err.to_string(), "Code \"nope\" not found. Please check spelling.");
    }

    #[tokio::test]
    async fn test_redeem_shouldCountUsesUntilCapReached() {
        let (service, repo) = service();
        let mut code = DiscountCodeRecord::fixed("ONCE", 20.0);
        code.max_uses = Some(1);
        repo.create_discount_code(&code).await.unwrap();

        let quote = service.redeem_discount_code("once", "unlimited").await.unwrap();
        assert_eq!(quote.final_price, 479.0);
        assert_eq!(repo.find_discount_code("ONCE").await.unwrap().unwrap().times_used, 1);

        let err = expect_discount_error(service.redeem_discount_code("ONCE", "unlimited").await);
        assert_eq!(err, DiscountError::MaxUsesReached);
    }

    #[tokio::test]
    async fn test_redeem_withSharedCappedCode_shouldNeverExceedCap() {
        let (service, repo) = service();
        let mut code = DiscountCodeRecord::percentage("FEW", 10.0);
        code.max_uses = Some(2);
        repo.create_discount_code(&code).await.unwrap();
        let other = DiscountService::new(repo.clone(), BillingConfig::default());

        let (a, b, c) = tokio::join!(
            service.redeem_discount_code("FEW", "unlimited"),
            other.redeem_discount_code("few", "pay_per_doc"),
            service.redeem_discount_code("FEW", "unlimited"),
        );
        let redeemed = [a, b, c].into_iter().filter(|r| r.is_ok()).count();

        assert_eq!(redeemed, 2);
        assert_eq!(repo.find_discount_code("FEW").await.unwrap().unwrap().times_used, 2);
        let err = expect_discount_error(other.redeem_discount_code("FEW", "unlimited").await);
        assert_eq!(err, DiscountError::MaxUsesReached);
    }
}

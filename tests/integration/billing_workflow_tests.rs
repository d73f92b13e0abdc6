/*!
 * Integration tests for discount and referral codes
 */

use anyhow::Result;
use pretty_assertions::assert_eq;
use section1983::billing::suggested_referral_codes;
use section1983::database::models::{DiscountCodeRecord, PlanType};
use section1983::errors::{AppError, DiscountError, ReferralCodeError};

use crate::common;

fn discount_error<T: std::fmt::Debug>(result: Result<T, AppError>) -> DiscountError {
    match result {
        Err(AppError::Discount(e)) => e,
        other => panic!("expected discount error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_referralCode_redeemedByAnotherUser_shouldDiscountAndCountUse() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    let referrals = controller.referrals();
    let discounts = controller.discounts();

    let code = referrals.create_referral_code(imported.user_id, "jane-roe").await?;
    assert_eq!(code.code, "JANE-ROE");
    assert_eq!(code.discount_value, 25.0);

    let quote = discounts.validate_discount_code("jane-roe", "unlimited").await?;
    assert_eq!(quote.plan_type, PlanType::Unlimited);
    assert_eq!(quote.original_price, 499.0);
    assert_eq!(quote.discount_amount, 124.75);
    assert_eq!(quote.final_price, 374.25);
    assert_eq!(quote.discount_display, "25% off");

    discounts.redeem_discount_code("JANE-ROE", "pay_per_doc").await?;
    let stats = referrals.referral_code_stats(imported.user_id).await?;
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].times_used, 1);
    assert!(stats[0].is_active);
    Ok(())
}

#[tokio::test]
async fn test_referralCode_whenPaused_shouldStopValidating() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    let referrals = controller.referrals();
    let code = referrals.create_referral_code(imported.user_id, "ROE2024").await?;

    assert!(!referrals.toggle_referral_code(imported.user_id, code.id).await?);
    let err = discount_error(controller.discounts().validate_discount_code("roe2024", "unlimited").await);
    assert_eq!(err, DiscountError::Inactive);

    // A paused code no longer blocks creating a new one
    let second = referrals.create_referral_code(imported.user_id, "ROE2025").await?;
    assert!(second.is_active);

    let stranger = controller.import_document(common::sample_bundle("stranger")).await?;
    let result = referrals.toggle_referral_code(stranger.user_id, code.id).await;
    assert!(matches!(result, Err(AppError::Referral(ReferralCodeError::NotFound))));
    Ok(())
}

#[tokio::test]
async fn test_discountCode_withFixedAmountAndFreePlan_shouldApplyRules() -> Result<()> {
    let controller = common::seeded_controller().await?;
    controller
        .repository()
        .create_discount_code(&DiscountCodeRecord::fixed("TENOFF", 10.0))
        .await?;
    let discounts = controller.discounts();

    let quote = discounts.validate_discount_code(" tenoff ", "pay_per_doc").await?;
    assert_eq!(quote.final_price, 139.0);
    assert_eq!(quote.discount_display, "$10 off");
    assert_eq!(quote.message, "✓ Code applied! $10 off");

    assert_eq!(
        discount_error(discounts.validate_discount_code("TENOFF", "free").await),
        DiscountError::InvalidPlan
    );
    assert_eq!(
        discount_error(discounts.validate_discount_code("", "unlimited").await),
        DiscountError::EmptyCode
    );
    assert_eq!(
        discount_error(discounts.validate_discount_code("NOPE", "unlimited").await),
        DiscountError::NotFound("NOPE".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_discountCode_atMaxUses_shouldBeRejected() -> Result<()> {
    let controller = common::seeded_controller().await?;
    let mut record = DiscountCodeRecord::percentage("ONCE", 50.0);
    record.max_uses = Some(1);
    controller.repository().create_discount_code(&record).await?;
    let discounts = controller.discounts();

    discounts.redeem_discount_code("once", "unlimited").await?;
    assert_eq!(
        discount_error(discounts.validate_discount_code("once", "unlimited").await),
        DiscountError::MaxUsesReached
    );
    Ok(())
}

#[tokio::test]
async fn test_suggestedReferralCodes_forImportedUser_shouldBeUsable() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    let user = controller
        .repository()
        .get_user(imported.user_id)
        .await?
        .expect("user should exist");

    let suggestions = suggested_referral_codes(&user);
    assert_eq!(suggestions.first().map(String::as_str), Some("JROE25"));

    let code = controller
        .referrals()
        .create_referral_code(imported.user_id, &suggestions[0])
        .await?;
    assert_eq!(code.code, "JROE25");
    Ok(())
}

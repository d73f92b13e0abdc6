/*!
 * Tests for error types and conversions
 */

use section1983::errors::{
    AppError, CourtLookupError, DiscountError, ProviderError, ReferralCodeError, TranscriptError,
};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_discountError_shouldUseCheckoutWording() {
    assert_eq!(DiscountError::EmptyCode.to_string(), "Please enter a discount code");
    assert_eq!(
        DiscountError::NotFound("SAVE".to_string()).to_string(),
        "Code \"SAVE\" not found. Please check spelling."
    );
    assert_eq!(DiscountError::MaxUsesReached.to_string(), "Code has reached maximum uses");
}

#[test]
fn test_referralCodeError_invalidLength_shouldShowBounds() {
    let error = ReferralCodeError::InvalidLength { min: 4, max: 20 };
    assert_eq!(error.to_string(), "Code must be between 4 and 20 characters.");
}

#[test]
fn test_transcriptError_fromProviderError_shouldWrapMessage() {
    let error: TranscriptError = ProviderError::RequestFailed("boom".to_string()).into();
    assert_eq!(error.to_string(), "Transcription error: API request failed: boom");
}

#[test]
fn test_appError_fromDomainErrors_shouldKeepSource() {
    let error: AppError = CourtLookupError::MissingLocation.into();
    assert!(matches!(error, AppError::Court(CourtLookupError::MissingLocation)));
    assert_eq!(error.to_string(), "Court lookup error: City and state are required");

    let error: AppError = DiscountError::Expired.into();
    assert!(matches!(error, AppError::Discount(DiscountError::Expired)));

    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(_)));
}

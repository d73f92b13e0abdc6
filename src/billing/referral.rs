/*!
 * User-owned referral codes.
 *
 * A referral code is an ordinary percentage discount code whose `created_by`
 * points at the referrer. Each user may hold one active code at a time.
 */

use log::info;
use serde::Serialize;

use crate::app_config::ReferralSettings;
use crate::database::models::{DiscountCodeRecord, UserRecord};
use crate::database::Repository;
use crate::errors::{AppError, ReferralCodeError};

/// Effectively unlimited, but still visible as a cap in listings
const REFERRAL_MAX_USES: i64 = 999_999;
const SUGGESTION_LENGTH: usize = 18;
const MAX_SUGGESTIONS: usize = 3;

/// Usage summary for a referrer's dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferralCodeStats {
    pub id: i64,
    pub code: String,
    pub is_active: bool,
    pub times_used: i64,
    pub max_uses: Option<i64>,
    pub discount_display: String,
}

impl From<&DiscountCodeRecord> for ReferralCodeStats {
    fn from(code: &DiscountCodeRecord) -> Self {
        Self {
            id: code.id,
            code: code.code.clone(),
            is_active: code.is_active,
            times_used: code.times_used,
            max_uses: code.max_uses,
            discount_display: code.display(),
        }
    }
}

/// Upper-case and check a requested code
pub fn normalize_referral_code(input: &str, settings: &ReferralSettings) -> Result<String, ReferralCodeError> {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        return Err(ReferralCodeError::Empty);
    }

    let length = code.chars().count();
    if length < settings.min_code_length || length > settings.max_code_length {
        return Err(ReferralCodeError::InvalidLength {
            min: settings.min_code_length,
            max: settings.max_code_length,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ReferralCodeError::InvalidCharacters);
    }

    Ok(code)
}

fn suggestion(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(SUGGESTION_LENGTH)
        .collect::<String>()
        .to_uppercase()
}

/// Up to three codes derived from the user's name and email
pub fn suggested_referral_codes(user: &UserRecord) -> Vec<String> {
    let mut candidates = Vec::new();

    if !user.username.is_empty() {
        candidates.push(suggestion(&format!("{}25", user.username)));
    }
    if !user.first_name.is_empty() && !user.last_name.is_empty() {
        candidates.push(suggestion(&format!("{}{}", user.first_name, user.last_name)));
    }
    if let Some((local, _)) = user.email.split_once('@') {
        candidates.push(suggestion(local));
    }

    let mut suggestions: Vec<String> = Vec::new();
    for candidate in candidates {
        if !candidate.is_empty() && !suggestions.contains(&candidate) {
            suggestions.push(candidate);
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Creates and manages referral codes
#[derive(Debug, Clone)]
pub struct ReferralService {
    repo: Repository,
    settings: ReferralSettings,
}

impl ReferralService {
    pub fn new(repo: Repository, settings: ReferralSettings) -> Self {
        Self { repo, settings }
    }

    /// The user's currently active code, if any
    pub async fn active_referral_code(&self, user_id: i64) -> Result<Option<DiscountCodeRecord>, AppError> {
        let codes = self.repo.codes_created_by(user_id).await?;
        Ok(codes.into_iter().find(|c| c.is_active))
    }

    /// All codes the user has ever created, newest first
    pub async fn referral_code_stats(&self, user_id: i64) -> Result<Vec<ReferralCodeStats>, AppError> {
        let codes = self.repo.codes_created_by(user_id).await?;
        Ok(codes.iter().map(ReferralCodeStats::from).collect())
    }

    /// Create a referral code for `user_id`
    pub async fn create_referral_code(&self, user_id: i64, requested: &str) -> Result<DiscountCodeRecord, AppError> {
        if let Some(existing) = self.active_referral_code(user_id).await? {
            return Err(ReferralCodeError::AlreadyHasCode(existing.code).into());
        }

        let code = normalize_referral_code(requested, &self.settings)?;
        if self.repo.find_discount_code(&code).await?.is_some() {
            return Err(ReferralCodeError::AlreadyTaken(code).into());
        }

        let mut record = DiscountCodeRecord::percentage(
            code,
            self.settings.default_referral_discount_percentage,
        );
        record.max_uses = Some(REFERRAL_MAX_USES);
        record.created_by = Some(user_id);
        record.id = self.repo.create_discount_code(&record).await?;

        info!("User {} created referral code {}", user_id, record.code);
        Ok(record)
    }

    /// Flip a code between active and paused; returns the new state
    pub async fn toggle_referral_code(&self, user_id: i64, code_id: i64) -> Result<bool, AppError> {
        let codes = self.repo.codes_created_by(user_id).await?;
        let code = codes
            .into_iter()
            .find(|c| c.id == code_id)
            .ok_or(ReferralCodeError::NotFound)?;

        let active = !code.is_active;
        self.repo.set_discount_code_active(code.id, active).await?;
        info!(
            "Referral code {} {}",
            code.code,
            if active { "activated" } else { "deactivated" }
        );
        Ok(active)
    }
}

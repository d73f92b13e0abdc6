/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing plan of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// Starter tier with a small AI allowance
    #[default]
    Free,
    /// One-off document purchases
    PayPerDoc,
    /// Monthly plan with a recurring AI credit
    Unlimited,
}

impl PlanType {
    /// Display name used in checkout
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanType::Free => "Free",
            PlanType::PayPerDoc => "Pay-Per-Document",
            PlanType::Unlimited => "Unlimited Plan",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Free => write!(f, "free"),
            PlanType::PayPerDoc => write!(f, "pay_per_doc"),
            PlanType::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl std::str::FromStr for PlanType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(PlanType::Free),
            "pay_per_doc" => Ok(PlanType::PayPerDoc),
            "unlimited" => Ok(PlanType::Unlimited),
            _ => Err(anyhow::anyhow!("Invalid plan type: {}", s)),
        }
    }
}

/// Lifecycle of a complaint draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Filed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "draft"),
            DocumentStatus::InProgress => write!(f, "in_progress"),
            DocumentStatus::Completed => write!(f, "completed"),
            DocumentStatus::Filed => write!(f, "filed"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(DocumentStatus::Draft),
            "in_progress" => Ok(DocumentStatus::InProgress),
            "completed" => Ok(DocumentStatus::Completed),
            "filed" => Ok(DocumentStatus::Filed),
            _ => Err(anyhow::anyhow!("Invalid document status: {}", s)),
        }
    }
}

/// How a discount code reduces the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` percent of the price
    #[default]
    Percentage,
    /// `discount_value` dollars, capped at the price
    Fixed,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

impl std::str::FromStr for DiscountType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            _ => Err(anyhow::anyhow!("Invalid discount type: {}", s)),
        }
    }
}

/// Account record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// Row id (ignored on insert)
    pub id: i64,
    /// Unique login name
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    /// "First Last", empty when neither is set
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Legal contact details and AI budget of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfileRecord {
    /// Owning user
    pub user_id: i64,
    /// Name as it should appear in pleadings
    pub full_legal_name: String,
    pub street_address: String,
    pub city: String,
    /// Usually a postal abbreviation
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    /// Dollars spent on AI calls so far
    pub total_api_cost: f64,
    /// Dollar ceiling on AI spend
    pub api_cost_limit: f64,
    /// Set the first time spend reaches the limit (RFC 3339)
    pub api_limit_reached_at: Option<String>,
}

impl Default for UserProfileRecord {
    fn default() -> Self {
        Self {
            user_id: 0,
            full_legal_name: String::new(),
            street_address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            phone_number: String::new(),
            total_api_cost: 0.0,
            api_cost_limit: 0.50,
            api_limit_reached_at: None,
        }
    }
}

impl UserProfileRecord {
    /// Budget left before the limit, never negative
    pub fn remaining_api_budget(&self) -> f64 {
        (self.api_cost_limit - self.total_api_cost).max(0.0)
    }

    /// Spend as a percentage of the limit
    pub fn usage_percentage(&self) -> f64 {
        if self.api_cost_limit <= 0.0 {
            return 0.0;
        }
        self.total_api_cost / self.api_cost_limit * 100.0
    }

    pub fn is_over_limit(&self) -> bool {
        self.total_api_cost >= self.api_cost_limit
    }

    /// Comma-joined non-empty address parts
    pub fn full_address(&self) -> String {
        [&self.street_address, &self.city, &self.state, &self.zip_code]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    }

    /// Whether every field needed on a filing is present
    pub fn is_complete(&self) -> bool {
        [
            &self.full_legal_name,
            &self.street_address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.phone_number,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Plan state of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionRecord {
    pub user_id: i64,
    pub plan_type: PlanType,
    pub is_active: bool,
    /// Prepaid AI credit in dollars
    pub api_credit_balance: f64,
    /// Credit added each billing month on the unlimited plan
    pub monthly_credit_amount: f64,
}

impl Default for SubscriptionRecord {
    fn default() -> Self {
        Self {
            user_id: 0,
            plan_type: PlanType::Free,
            is_active: true,
            api_credit_balance: 0.50,
            monthly_credit_amount: 10.0,
        }
    }
}

/// Complaint draft, the aggregate root that owns sections and evidence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRecord {
    /// Row id (ignored on insert)
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    /// Free-text account of the incident; classifier input
    pub description: String,
    pub incident_date: Option<NaiveDate>,
    /// Free-text location; forum classifier input
    pub incident_location: String,
    pub incident_street_address: String,
    pub incident_city: String,
    pub incident_state: String,
    pub incident_county: String,
    /// Names and positions of defendants
    pub defendants: String,
    pub youtube_url: String,
    pub additional_evidence: String,
    pub status: DocumentStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// One generated part of a complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: i64,
    pub document_id: i64,
    /// Section label such as `facts`
    pub section_type: String,
    pub title: String,
    pub content: String,
    /// Display position
    pub sort_order: i64,
    /// Content came from the AI path
    pub ai_enhanced: bool,
    /// Dollars charged for this section
    pub ai_cost: f64,
    pub ai_model: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for inserting or updating a section row
#[derive(Debug, Clone, PartialEq)]
pub struct SectionUpsert {
    pub document_id: i64,
    pub section_type: String,
    pub title: String,
    pub content: String,
    /// Position used only when the row is created; `None` appends
    pub sort_order: Option<i64>,
    pub ai_enhanced: bool,
    pub ai_cost: f64,
    pub ai_model: Option<String>,
}

impl SectionUpsert {
    pub fn new(
        document_id: i64,
        section_type: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            document_id,
            section_type: section_type.into(),
            title: title.into(),
            content: content.into(),
            sort_order: None,
            ai_enhanced: false,
            ai_cost: 0.0,
            ai_model: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Mark the content as AI-generated
    pub fn with_ai(mut self, cost: f64, model: impl Into<String>) -> Self {
        self.ai_enhanced = true;
        self.ai_cost = cost;
        self.ai_model = Some(model.into());
        self
    }
}

/// Boilerplate paragraph keyed by (violation, location, section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalTemplateRecord {
    pub id: i64,
    pub violation_type: String,
    pub location_type: String,
    pub section_type: String,
    pub template_text: String,
}

impl LegalTemplateRecord {
    /// Build an unsaved template row
    pub fn new(
        violation_type: impl Into<String>,
        location_type: impl Into<String>,
        section_type: impl Into<String>,
        template_text: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            violation_type: violation_type.into(),
            location_type: location_type.into(),
            section_type: section_type.into(),
            template_text: template_text.into(),
        }
    }
}

/// Checkout discount or referral code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCodeRecord {
    pub id: i64,
    /// Stored upper-case; lookups ignore case
    pub code: String,
    pub discount_type: DiscountType,
    /// Percent or dollars depending on `discount_type`
    pub discount_value: f64,
    pub is_active: bool,
    /// `None` means unlimited
    pub max_uses: Option<i64>,
    pub times_used: i64,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    /// Referrer who owns the code, if any
    pub created_by: Option<i64>,
}

impl DiscountCodeRecord {
    /// Build an unsaved, always-valid percentage code
    pub fn percentage(code: impl Into<String>, percent: f64) -> Self {
        Self {
            id: 0,
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: percent,
            is_active: true,
            max_uses: None,
            times_used: 0,
            valid_from: None,
            valid_until: None,
            created_by: None,
        }
    }

    /// Build an unsaved fixed-amount code
    pub fn fixed(code: impl Into<String>, amount: f64) -> Self {
        Self {
            discount_type: DiscountType::Fixed,
            discount_value: amount,
            ..Self::percentage(code, 0.0)
        }
    }
}

/// Reviewed slice of a video attached to a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceSegmentRecord {
    pub id: i64,
    pub document_id: i64,
    pub youtube_url: String,
    pub start_seconds: i64,
    pub end_seconds: i64,
    /// Display timestamp such as `1:05`
    pub start_time: String,
    pub end_time: String,
    pub include_in_complaint: bool,
    /// Comma-separated violation labels
    pub violation_tags: String,
}

/// Attributed quote inside an evidence segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptQuoteRecord {
    pub id: i64,
    pub segment_id: i64,
    pub speaker_name: String,
    pub speaker_role: String,
    pub text: String,
    /// Short framing sentence placed before the quote
    pub significance: String,
    pub include_in_document: bool,
    pub sort_order: i64,
    pub start_position: i64,
    pub violation_tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planType_roundTrip() {
        for plan in [PlanType::Free, PlanType::PayPerDoc, PlanType::Unlimited] {
            let s = plan.to_string();
            let parsed: PlanType = s.parse().unwrap();
            assert_eq!(plan, parsed);
        }
    }

    #[test]
    fn test_documentStatus_fromStr_withInvalid_shouldFail() {
        assert!("archived".parse::<DocumentStatus>().is_err());
        assert_eq!("IN_PROGRESS".parse::<DocumentStatus>().unwrap(), DocumentStatus::InProgress);
    }

    #[test]
    fn test_profile_remainingBudget_shouldNeverBeNegative() {
        let profile = UserProfileRecord {
            total_api_cost: 0.75,
            api_cost_limit: 0.50,
            ..Default::default()
        };
        assert_eq!(profile.remaining_api_budget(), 0.0);
        assert!(profile.is_over_limit());
        assert_eq!(profile.usage_percentage(), 150.0);
    }

    #[test]
    fn test_profile_fullAddress_shouldSkipBlankParts() {
        let profile = UserProfileRecord {
            street_address: "1 Main St".to_string(),
            city: "Erie".to_string(),
            state: "PA".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.full_address(), "1 Main St, Erie, PA");
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_user_fullName_withOnlyFirstName() {
        let user = UserRecord {
            first_name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Jane");
    }
}

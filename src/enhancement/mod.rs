/*!
 * AI enhancement of complaint sections.
 *
 * A section is only sent to the model when AI is enabled for its type, the
 * user's budget covers the estimated cost and a provider is configured. Every
 * other path, including provider errors and rejected output, falls back to
 * the rendered template. Spend is recorded only for output that is kept.
 */

pub mod budget;
pub mod prompts;
pub mod validation;

use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::analysis::classify_document;
use crate::app_config::{AiConfig, BillingConfig};
use crate::database::models::{DocumentRecord, LegalTemplateRecord, PlanType};
use crate::database::Repository;
use crate::providers::{ChatMessage, ChatRequest, ChatResponse, Provider, Usage};
use crate::templates::TemplateContext;

pub use budget::{evaluate_budget, BudgetCheck};
pub use validation::{validate_output, OutputRejection};

/// Dollars per input token
pub const INPUT_COST_PER_TOKEN: f64 = 0.0000025;
/// Dollars per output token
pub const OUTPUT_COST_PER_TOKEN: f64 = 0.00001;

/// Dollar cost of one completion
pub fn calculate_cost(usage: &Usage) -> f64 {
    usage.prompt_tokens as f64 * INPUT_COST_PER_TOKEN
        + usage.completion_tokens as f64 * OUTPUT_COST_PER_TOKEN
}

/// Text kept from the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedSection {
    pub content: String,
    pub cost: f64,
    pub model: String,
    pub tokens_used: u64,
    pub warning: Option<String>,
}

/// Why the template text is used instead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateFallback {
    pub reason: String,
    pub upgrade_prompt: Option<String>,
    pub remaining_budget: Option<f64>,
    /// Spend on a call whose output was discarded; never charged
    pub cost: f64,
}

impl TemplateFallback {
    fn because(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            upgrade_prompt: None,
            remaining_budget: None,
            cost: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum EnhancementOutcome {
    #[serde(rename = "ai")]
    Enhanced(EnhancedSection),
    #[serde(rename = "template_fallback")]
    Fallback(TemplateFallback),
}

/// Estimated spend for enhancing a set of sections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentCostEstimate {
    pub total_cost: f64,
    pub section_costs: BTreeMap<String, f64>,
    pub section_count: usize,
}

/// Budget-gated section rewriting
#[derive(Debug)]
pub struct EnhancementService<P> {
    repo: Repository,
    ai: AiConfig,
    billing: BillingConfig,
    /// `None` when no API key is configured
    provider: Option<P>,
}

impl<P> EnhancementService<P>
where
    P: Provider<Request = ChatRequest, Response = ChatResponse>,
{
    pub fn new(repo: Repository, ai: AiConfig, billing: BillingConfig, provider: Option<P>) -> Self {
        Self {
            repo,
            ai,
            billing,
            provider,
        }
    }

    pub fn ai_config(&self) -> &AiConfig {
        &self.ai
    }

    /// Check a user's budget for one section type
    pub async fn check_user_budget(&self, user_id: i64, section_type: &str) -> Result<BudgetCheck> {
        let subscription = self.repo.get_subscription(user_id).await?;
        let profile = self.repo.get_profile(user_id).await?;
        Ok(evaluate_budget(
            self.ai.section(section_type),
            subscription.as_ref(),
            profile.as_ref(),
            &self.billing,
        ))
    }

    /// Prompt for a section, or `None` when the section has no prompt
    pub fn build_prompt(
        &self,
        template: &LegalTemplateRecord,
        document: &DocumentRecord,
        context: &TemplateContext,
    ) -> Option<String> {
        let prompt = prompts::prompt_template(&template.section_type)?;
        let (violation, forum) = classify_document(document);

        let description = if document.description.trim().is_empty() {
            "[No description provided]".to_string()
        } else {
            document.description.clone()
        };

        let mut values: BTreeMap<&str, String> = BTreeMap::new();
        values.insert("template_text", template.template_text.clone());
        values.insert("user_description", description);
        values.insert("incident_date", context.incident_date.clone());
        values.insert("incident_location", context.incident_location.clone());
        values.insert("defendants", context.defendants.clone());
        values.insert("violation_type", violation.as_str().to_string());
        values.insert("location_type", forum.as_str().to_string());
        values.insert("plaintiff_name", context.plaintiff_name.clone());
        values.insert("plaintiff_state", context.plaintiff_state.clone());

        Some(prompts::substitute(prompt, &values))
    }

    /// Try to rewrite one templated section with the model
    pub async fn enhance_section(
        &self,
        template: &LegalTemplateRecord,
        document: &DocumentRecord,
        context: &TemplateContext,
    ) -> EnhancementOutcome {
        let section_type = template.section_type.as_str();
        let Some(section) = self.ai.section(section_type) else {
            return EnhancementOutcome::Fallback(TemplateFallback::because(
                "AI not enabled for this section",
            ));
        };

        let budget = match self.check_user_budget(document.user_id, section_type).await {
            Ok(budget) => budget,
            Err(e) => {
                warn!("Budget check failed for user {}: {}", document.user_id, e);
                return EnhancementOutcome::Fallback(TemplateFallback::because(format!(
                    "AI enhancement error: {}",
                    e
                )));
            }
        };

        let (plan_type, warning) = match budget {
            BudgetCheck::Allowed {
                plan_type, warning, ..
            } => (plan_type, warning),
            BudgetCheck::Denied {
                reason,
                remaining_budget,
                upgrade_prompt,
                ..
            } => {
                info!("AI denied for {} on document {}: {}", section_type, document.id, reason);
                return EnhancementOutcome::Fallback(TemplateFallback {
                    reason,
                    upgrade_prompt,
                    remaining_budget: Some(remaining_budget),
                    cost: 0.0,
                });
            }
        };

        let Some(provider) = self.provider.as_ref() else {
            return EnhancementOutcome::Fallback(TemplateFallback::because(
                "OpenAI API key not configured",
            ));
        };
        let Some(prompt) = self.build_prompt(template, document, context) else {
            return EnhancementOutcome::Fallback(TemplateFallback::because(
                "AI not enabled for this section",
            ));
        };

        let request = ChatRequest::new(section.model.clone())
            .add_message(ChatMessage::system(self.ai.system_prompt.clone()))
            .add_message(ChatMessage::user(prompt))
            .temperature(section.temperature)
            .max_tokens(section.max_tokens)
            .drafting_penalties()
            .timeout(Duration::from_secs(self.ai.timeout_secs));

        let response = match provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("AI call for {} failed: {}", section_type, e);
                return EnhancementOutcome::Fallback(TemplateFallback::because(format!(
                    "AI enhancement error: {}",
                    e
                )));
            }
        };

        let content = P::extract_text(&response);
        let cost = calculate_cost(&response.usage);

        if let Err(rejection) = validate_output(&content, section_type, &template.template_text) {
            warn!("Discarded AI output for {}: {}", section_type, rejection);
            return EnhancementOutcome::Fallback(TemplateFallback {
                reason: format!("AI output validation failed: {}", rejection),
                upgrade_prompt: None,
                remaining_budget: None,
                cost,
            });
        }

        let deduct_credit = plan_type == PlanType::Unlimited;
        if let Err(e) = self
            .repo
            .record_api_cost(document.user_id, cost, deduct_credit)
            .await
        {
            warn!("Could not record AI cost for user {}: {}", document.user_id, e);
            return EnhancementOutcome::Fallback(TemplateFallback::because(format!(
                "AI enhancement error: {}",
                e
            )));
        }

        debug!(
            "Enhanced {} for document {} (${:.4}, {} tokens)",
            section_type, document.id, cost, response.usage.total_tokens
        );
        EnhancementOutcome::Enhanced(EnhancedSection {
            content,
            cost,
            model: section.model.clone(),
            tokens_used: response.usage.total_tokens,
            warning,
        })
    }

    /// Estimated spend for the given sections, or every enabled one
    pub fn estimated_document_cost(&self, section_types: Option<&[&str]>) -> DocumentCostEstimate {
        let enabled: Vec<&str> = self
            .ai
            .sections
            .keys()
            .map(|s| s.as_str())
            .filter(|s| self.ai.section(s).is_some())
            .collect();
        let requested = section_types.map(|s| s.to_vec()).unwrap_or(enabled);

        let section_costs: BTreeMap<String, f64> = requested
            .iter()
            .filter_map(|s| self.ai.section(s).map(|cfg| (s.to_string(), cfg.estimated_cost)))
            .collect();
        let total: f64 = section_costs.values().sum();

        DocumentCostEstimate {
            total_cost: (total * 1000.0).round() / 1000.0,
            section_count: section_costs.len(),
            section_costs,
        }
    }
}

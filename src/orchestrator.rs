/*!
 * Document pipeline.
 *
 * `auto_populate_document` runs the whole flow for one complaint:
 * classify the incident, find the matching templates, build the rendering
 * context, render (and optionally enhance) each template, upsert the
 * sections and put them in filing order. The other entry points expose
 * parts of that flow without writing everything.
 */

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;

use crate::analysis::{classify_document, ForumType, ViolationType};
use crate::database::models::{DocumentRecord, LegalTemplateRecord, SectionRecord, SectionUpsert};
use crate::database::Repository;
use crate::enhancement::{EnhancementOutcome, EnhancementService};
use crate::providers::{ChatRequest, ChatResponse, Provider};
use crate::sections::{MissingSection, SectionService, SectionType};
use crate::templates::{render, AvailableSection, TemplateContext, TemplatePreview, TemplateService};

/// How a section's content was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Template,
    Ai,
}

/// Per-template result of a populate run
#[derive(Debug, Clone, Serialize)]
pub struct SectionResult {
    pub section: SectionRecord,
    pub created: bool,
    pub template_id: i64,
    pub source: ContentSource,
    pub ai_cost: f64,
    /// Why AI was requested but not used
    pub fallback_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulateReport {
    pub violation_type: ViolationType,
    pub location_type: ForumType,
    pub templates_found: usize,
    pub sections_created: usize,
    pub sections_updated: usize,
    /// Sections in filing order after the run
    pub sections: Vec<SectionRecord>,
    pub context_used: TemplateContext,
    pub results_detail: Vec<SectionResult>,
    pub ai_enhanced_count: usize,
    pub total_ai_cost: f64,
    pub warnings: Vec<String>,
    pub upgrade_prompts: Vec<String>,
}

/// Classification and completeness of a document, without writing anything
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub violation_type: ViolationType,
    pub violation_description: String,
    pub location_type: ForumType,
    pub location_description: String,
    pub available_templates: usize,
    pub available_sections: Vec<AvailableSection>,
    pub current_sections: usize,
    pub completion_percentage: f64,
    pub missing_sections: Vec<MissingSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionPreviews {
    pub violation_type: ViolationType,
    pub location_type: ForumType,
    pub section_previews: Vec<TemplatePreview>,
}

/// Result of regenerating one section
#[derive(Debug, Clone, Serialize)]
pub struct SectionUpdateReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    pub violation_type: ViolationType,
    pub location_type: ForumType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Coordinates classification, templates, enhancement and section storage
#[derive(Debug)]
pub struct DocumentOrchestrator<P> {
    repo: Repository,
    templates: TemplateService,
    sections: SectionService,
    enhancement: EnhancementService<P>,
}

impl<P> DocumentOrchestrator<P>
where
    P: Provider<Request = ChatRequest, Response = ChatResponse>,
{
    pub fn new(repo: Repository, enhancement: EnhancementService<P>) -> Self {
        Self {
            templates: TemplateService::new(repo.clone()),
            sections: SectionService::new(repo.clone()),
            repo,
            enhancement,
        }
    }

    async fn load_document(&self, document_id: i64) -> Result<DocumentRecord> {
        self.repo
            .get_document(document_id)
            .await?
            .ok_or_else(|| anyhow!("Document {} not found", document_id))
    }

    async fn build_context(&self, document: &DocumentRecord) -> Result<TemplateContext> {
        let user = self
            .repo
            .get_user(document.user_id)
            .await?
            .ok_or_else(|| anyhow!("User {} not found", document.user_id))?;
        let profile = self.repo.get_profile(document.user_id).await?;
        Ok(TemplateContext::build(document, &user, profile.as_ref()))
    }

    /// Render one template, passing it through the model when `use_ai` is set
    async fn section_content(
        &self,
        template: &LegalTemplateRecord,
        document: &DocumentRecord,
        context: &TemplateContext,
        use_ai: bool,
        report: &mut PopulateReport,
    ) -> (SectionUpsert, ContentSource, Option<String>) {
        let rendered = render(&template.template_text, &context.to_map());
        let upsert = SectionUpsert::new(
            document.id,
            template.section_type.as_str(),
            SectionType::title_for(&template.section_type),
            rendered,
        )
        .with_order(SectionType::order_for(&template.section_type));

        if !use_ai {
            return (upsert, ContentSource::Template, None);
        }

        match self.enhancement.enhance_section(template, document, context).await {
            EnhancementOutcome::Enhanced(enhanced) => {
                report.ai_enhanced_count += 1;
                report.total_ai_cost += enhanced.cost;
                if let Some(warning) = enhanced.warning {
                    push_unique(&mut report.warnings, warning);
                }
                let upsert = SectionUpsert {
                    content: enhanced.content,
                    ..upsert
                }
                .with_ai(enhanced.cost, enhanced.model);
                (upsert, ContentSource::Ai, None)
            }
            EnhancementOutcome::Fallback(fallback) => {
                if let Some(prompt) = fallback.upgrade_prompt {
                    push_unique(&mut report.upgrade_prompts, prompt);
                }
                (upsert, ContentSource::Template, Some(fallback.reason))
            }
        }
    }

    /// Generate every section the document's classification has templates for
    pub async fn auto_populate_document(&self, document_id: i64, use_ai: bool) -> Result<PopulateReport> {
        let document = self.load_document(document_id).await?;
        let (violation, location) = classify_document(&document);
        let templates = self.templates.find_templates(violation, location).await?;
        let context = self.build_context(&document).await?;

        info!(
            "Populating document {} as {}/{} from {} templates{}",
            document.id,
            violation,
            location,
            templates.len(),
            if use_ai { " with AI" } else { "" }
        );

        let mut report = PopulateReport {
            violation_type: violation,
            location_type: location,
            templates_found: templates.len(),
            sections_created: 0,
            sections_updated: 0,
            sections: Vec::new(),
            context_used: context.clone(),
            results_detail: Vec::with_capacity(templates.len()),
            ai_enhanced_count: 0,
            total_ai_cost: 0.0,
            warnings: Vec::new(),
            upgrade_prompts: Vec::new(),
        };

        for template in &templates {
            let (upsert, source, fallback_reason) = self
                .section_content(template, &document, &context, use_ai, &mut report)
                .await;
            let ai_cost = upsert.ai_cost;
            let (section, created) = self.sections.upsert(upsert).await?;

            if created {
                report.sections_created += 1;
            } else {
                report.sections_updated += 1;
            }
            debug!(
                "{} {} ({:?})",
                if created { "Created" } else { "Updated" },
                section.section_type,
                source
            );
            report.results_detail.push(SectionResult {
                section,
                created,
                template_id: template.id,
                source,
                ai_cost,
                fallback_reason,
            });
        }

        self.sections.reorder_sections(document.id).await?;
        report.sections = self.sections.document_sections(document.id).await?;
        report.total_ai_cost = (report.total_ai_cost * 10_000.0).round() / 10_000.0;

        info!(
            "Document {}: {} created, {} updated, {} AI-enhanced (${:.4})",
            document.id,
            report.sections_created,
            report.sections_updated,
            report.ai_enhanced_count,
            report.total_ai_cost
        );
        Ok(report)
    }

    pub async fn document_analysis(&self, document_id: i64) -> Result<DocumentAnalysis> {
        let document = self.load_document(document_id).await?;
        let (violation, location) = classify_document(&document);
        let available_sections = self.templates.available_sections(violation, location).await?;
        let stats = self.sections.section_statistics(document.id).await?;

        Ok(DocumentAnalysis {
            violation_type: violation,
            violation_description: violation.description().to_string(),
            location_type: location,
            location_description: location.description().to_string(),
            available_templates: available_sections.len(),
            available_sections,
            current_sections: stats.total_sections,
            completion_percentage: stats.completion_percentage,
            missing_sections: stats.missing_sections,
        })
    }

    /// Render every matching template without storing anything
    pub async fn preview_sections(&self, document_id: i64) -> Result<SectionPreviews> {
        let document = self.load_document(document_id).await?;
        let (violation, location) = classify_document(&document);
        let context = self.build_context(&document).await?;
        let templates = self.templates.find_templates(violation, location).await?;

        let mut section_previews = Vec::with_capacity(templates.len());
        for template in templates {
            if let Some(preview) = self
                .templates
                .preview_template(violation, location, &template.section_type, Some(&context))
                .await?
            {
                section_previews.push(preview);
            }
        }

        Ok(SectionPreviews {
            violation_type: violation,
            location_type: location,
            section_previews,
        })
    }

    /// Regenerate a single section from its current template
    pub async fn update_specific_section(&self, document_id: i64, section_type: &str) -> Result<SectionUpdateReport> {
        let document = self.load_document(document_id).await?;
        let (violation, location) = classify_document(&document);

        let Some(template) = self
            .templates
            .get_template_by_section(violation, location, section_type)
            .await?
        else {
            return Ok(SectionUpdateReport {
                success: false,
                section: None,
                created: None,
                template_id: None,
                violation_type: violation,
                location_type: location,
                error: Some(format!("No template found for {}", section_type)),
            });
        };

        let context = self.build_context(&document).await?;
        let (section, created) = self
            .sections
            .create_section_from_template(document.id, &template, &context)
            .await?;

        Ok(SectionUpdateReport {
            success: true,
            section: Some(section),
            created: Some(created),
            template_id: Some(template.id),
            violation_type: violation,
            location_type: location,
            error: None,
        })
    }
}

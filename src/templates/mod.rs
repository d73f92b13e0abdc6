/*!
 * Legal templates: catalog, rendering context, renderer and matching.
 *
 * Templates are keyed by (violation type, forum type, section type). The
 * matcher looks them up for a classified incident and renders them against
 * a [`TemplateContext`] built from the document.
 */

pub mod catalog;
pub mod context;
pub mod renderer;

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::analysis::{ForumType, ViolationType};
use crate::database::models::LegalTemplateRecord;
use crate::database::Repository;
use crate::sections::SectionType;

pub use catalog::{seed_templates, SeedReport, SEED_TEMPLATES};
pub use context::TemplateContext;
pub use renderer::render;

/// Section offered by the templates of a classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableSection {
    pub section_type: String,
    pub section_display: String,
    pub is_required: bool,
}

/// Raw and rendered text of one template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplatePreview {
    pub section_type: String,
    pub template_text: String,
    pub rendered_content: String,
    pub is_required: bool,
}

/// Template count for one (violation, location) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateGroupCount {
    pub violation_type: String,
    pub location_type: String,
    pub section_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateStatistics {
    pub total_templates: usize,
    pub by_violation_location: Vec<TemplateGroupCount>,
    pub violation_types: Vec<String>,
    pub location_types: Vec<String>,
}

/// Template lookup and preview
#[derive(Debug, Clone)]
pub struct TemplateService {
    repo: Repository,
}

impl TemplateService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Store the built-in catalog
    pub async fn seed(&self) -> Result<SeedReport> {
        seed_templates(&self.repo).await
    }

    /// All templates for a classification, ordered by section type
    pub async fn find_templates(
        &self,
        violation: ViolationType,
        location: ForumType,
    ) -> Result<Vec<LegalTemplateRecord>> {
        self.repo
            .find_templates(violation.as_str(), location.as_str())
            .await
    }

    pub async fn get_template_by_section(
        &self,
        violation: ViolationType,
        location: ForumType,
        section_type: &str,
    ) -> Result<Option<LegalTemplateRecord>> {
        self.repo
            .get_template(violation.as_str(), location.as_str(), section_type)
            .await
    }

    pub async fn available_sections(
        &self,
        violation: ViolationType,
        location: ForumType,
    ) -> Result<Vec<AvailableSection>> {
        let templates = self.find_templates(violation, location).await?;
        Ok(templates
            .into_iter()
            .map(|t| AvailableSection {
                section_display: SectionType::title_for(&t.section_type),
                section_type: t.section_type,
                is_required: true,
            })
            .collect())
    }

    /// Show a template, rendered when a context is supplied
    pub async fn preview_template(
        &self,
        violation: ViolationType,
        location: ForumType,
        section_type: &str,
        context: Option<&TemplateContext>,
    ) -> Result<Option<TemplatePreview>> {
        let Some(template) = self
            .get_template_by_section(violation, location, section_type)
            .await?
        else {
            return Ok(None);
        };

        let rendered_content = match context {
            Some(ctx) => render(&template.template_text, &ctx.to_map()),
            None => template.template_text.clone(),
        };

        Ok(Some(TemplatePreview {
            section_type: template.section_type,
            template_text: template.template_text,
            rendered_content,
            is_required: true,
        }))
    }

    pub async fn template_statistics(&self) -> Result<TemplateStatistics> {
        let templates = self.repo.list_templates().await?;

        let mut groups: Vec<TemplateGroupCount> = Vec::new();
        for template in &templates {
            match groups.last_mut() {
                Some(group)
                    if group.violation_type == template.violation_type
                        && group.location_type == template.location_type =>
                {
                    group.section_count += 1
                }
                _ => groups.push(TemplateGroupCount {
                    violation_type: template.violation_type.clone(),
                    location_type: template.location_type.clone(),
                    section_count: 1,
                }),
            }
        }

        let violation_types: BTreeSet<String> =
            templates.iter().map(|t| t.violation_type.clone()).collect();
        let location_types: BTreeSet<String> =
            templates.iter().map(|t| t.location_type.clone()).collect();

        Ok(TemplateStatistics {
            total_templates: templates.len(),
            by_violation_location: groups,
            violation_types: violation_types.into_iter().collect(),
            location_types: location_types.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{DocumentRecord, UserRecord};
    use chrono::NaiveDate;

    async fn seeded_service() -> TemplateService {
        let repo = Repository::new_in_memory().unwrap();
        let service = TemplateService::new(repo);
        service.seed().await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_findTemplates_shouldOrderBySectionType() {
        let service = seeded_service().await;

        let templates = service
            .find_templates(ViolationType::InterferenceRecording, ForumType::TraditionalPublicForum)
            .await
            .unwrap();
        let sections: Vec<&str> = templates.iter().map(|t| t.section_type.as_str()).collect();
        assert_eq!(sections, vec!["claims", "facts", "jurisdiction", "prayer"]);
    }

    #[tokio::test]
    async fn test_findTemplates_withUncoveredForum_shouldBeEmpty() {
        let service = seeded_service().await;
        let templates = service
            .find_templates(ViolationType::ThreatenedArrestPublic, ForumType::LimitedPublicForum)
            .await
            .unwrap();
        assert!(templates.is_empty());
    }

    #[tokio::test]
    async fn test_availableSections_shouldUseSectionTitles() {
        let service = seeded_service().await;
        let sections = service
            .available_sections(ViolationType::ForcedToLeavePublic, ForumType::DesignatedPublicForum)
            .await
            .unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_display, "Claims for Relief");
    }

    #[tokio::test]
    async fn test_previewTemplate_withContext_shouldRender() {
        let service = seeded_service().await;
        let document = DocumentRecord {
            incident_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            incident_location: "Main Street".to_string(),
            ..Default::default()
        };
        let user = UserRecord {
            username: "u".to_string(),
            ..Default::default()
        };
        let context = TemplateContext::build(&document, &user, None);

        let preview = service
            .preview_template(
                ViolationType::InterferenceRecording,
                ForumType::TraditionalPublicForum,
                "facts",
                Some(&context),
            )
            .await
            .unwrap()
            .unwrap();

        assert!(preview.template_text.contains("{{incident_date}}"));
        assert!(preview.rendered_content.starts_with("On January 02, 2024, Plaintiff was lawfully present at Main Street"));
    }

    #[tokio::test]
    async fn test_previewTemplate_withUnknownSection_shouldReturnNone() {
        let service = seeded_service().await;
        let preview = service
            .preview_template(
                ViolationType::InterferenceRecording,
                ForumType::TraditionalPublicForum,
                "parties",
                None,
            )
            .await
            .unwrap();
        assert!(preview.is_none());
    }

    #[tokio::test]
    async fn test_templateStatistics_shouldGroupByClassification() {
        let service = seeded_service().await;
        let stats = service.template_statistics().await.unwrap();

        assert_eq!(stats.total_templates, 17);
        assert_eq!(stats.by_violation_location.len(), 6);
        assert_eq!(stats.violation_types.len(), 4);
        assert_eq!(
            stats.location_types,
            vec!["designated_public_forum".to_string(), "traditional_public_forum".to_string()]
        );
        let total: usize = stats.by_violation_location.iter().map(|g| g.section_count).sum();
        assert_eq!(total, 17);
    }
}

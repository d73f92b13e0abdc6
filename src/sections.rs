/*!
 * Section writer.
 *
 * Creates, updates and orders the sections of a complaint. A document has at
 * most one section per section type; writing the same type again updates the
 * existing row in place and keeps its position.
 */

use anyhow::Result;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::analysis::title_case_label;
use crate::database::models::{
    DocumentRecord, LegalTemplateRecord, SectionRecord, SectionUpsert, UserProfileRecord,
};
use crate::database::Repository;
use crate::jurisdiction::full_state_name;
use crate::templates::{render, TemplateContext};

/// Position given to section types outside the standard order
pub const UNKNOWN_SECTION_ORDER: i64 = 999;

/// Parts of a federal civil rights complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Introduction,
    Jurisdiction,
    Parties,
    Facts,
    Claims,
    Prayer,
    JuryDemand,
    Exhibits,
}

impl SectionType {
    /// The seven sections every complaint carries, in filing order
    pub const STANDARD: [SectionType; 7] = [
        SectionType::Introduction,
        SectionType::Jurisdiction,
        SectionType::Parties,
        SectionType::Facts,
        SectionType::Claims,
        SectionType::Prayer,
        SectionType::JuryDemand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Introduction => "introduction",
            SectionType::Jurisdiction => "jurisdiction",
            SectionType::Parties => "parties",
            SectionType::Facts => "facts",
            SectionType::Claims => "claims",
            SectionType::Prayer => "prayer",
            SectionType::JuryDemand => "jury_demand",
            SectionType::Exhibits => "exhibits",
        }
    }

    /// Heading printed in the complaint
    pub fn title(&self) -> &'static str {
        match self {
            SectionType::Introduction => "Introduction",
            SectionType::Jurisdiction => "Jurisdiction and Venue",
            SectionType::Parties => "Parties",
            SectionType::Facts => "Statement of Facts",
            SectionType::Claims => "Claims for Relief",
            SectionType::Prayer => "Prayer for Relief",
            SectionType::JuryDemand => "Jury Trial Demand",
            SectionType::Exhibits => "Exhibits",
        }
    }

    /// Position in a filed complaint
    pub fn standard_order(&self) -> i64 {
        match self {
            SectionType::Introduction => 1,
            SectionType::Jurisdiction => 2,
            SectionType::Parties => 3,
            SectionType::Facts => 4,
            SectionType::Claims => 5,
            SectionType::Prayer => 6,
            SectionType::JuryDemand => 7,
            SectionType::Exhibits => 8,
        }
    }

    /// Title for any stored label, title-casing unknown ones
    pub fn title_for(label: &str) -> String {
        match label.parse::<SectionType>() {
            Ok(section) => section.title().to_string(),
            Err(_) => title_case_label(label),
        }
    }

    /// Order for any stored label, unknown ones go last
    pub fn order_for(label: &str) -> i64 {
        label
            .parse::<SectionType>()
            .map(|section| section.standard_order())
            .unwrap_or(UNKNOWN_SECTION_ORDER)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        SectionType::STANDARD
            .iter()
            .chain(std::iter::once(&SectionType::Exhibits))
            .copied()
            .find(|section| section.as_str() == label)
            .ok_or_else(|| anyhow::anyhow!("Invalid section type: {}", s))
    }
}

/// Outcome of generating one section from a template
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSection {
    pub section: SectionRecord,
    pub created: bool,
    pub template_id: i64,
}

/// Standard section a document does not have yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingSection {
    pub section_type: String,
    pub title: String,
    pub order: i64,
}

/// Type, title and position of an existing section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    pub section_type: String,
    pub title: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionStatistics {
    pub total_sections: usize,
    pub total_possible: usize,
    pub completion_percentage: f64,
    pub missing_count: usize,
    pub sections_by_type: Vec<SectionSummary>,
    pub missing_sections: Vec<MissingSection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DefaultSectionsReport {
    pub sections_created: usize,
    pub sections_updated: usize,
    pub total_sections: usize,
}

/// Boilerplate for the seven standard sections
pub fn default_section_content(
    section: SectionType,
    document: &DocumentRecord,
    profile: Option<&UserProfileRecord>,
) -> String {
    match section {
        SectionType::Introduction => "Plaintiff brings this civil rights action seeking damages and injunctive relief for violations of constitutional rights under 42 U.S.C. § 1983.".to_string(),
        SectionType::Jurisdiction => "This Court has jurisdiction over this action pursuant to 28 U.S.C. §§ 1331 and 1343, as this action arises under the Constitution and laws of the United States. Venue is proper in this district under 28 U.S.C. § 1391(b).".to_string(),
        SectionType::Parties => {
            let state = profile
                .map(|p| p.state.trim())
                .filter(|s| !s.is_empty())
                .map(full_state_name)
                .unwrap_or_else(|| "[STATE]".to_string());
            let defendants = if document.defendants.trim().is_empty() {
                "[DEFENDANTS TO BE IDENTIFIED]"
            } else {
                document.defendants.as_str()
            };
            format!(
                "Plaintiff is a citizen and resident of {}. {} are individuals acting under color of state law.",
                state, defendants
            )
        }
        SectionType::Facts => {
            let date = document
                .incident_date
                .map(|d| d.format("%B %d, %Y").to_string())
                .unwrap_or_else(|| "[DATE]".to_string());
            let location = if document.incident_location.trim().is_empty() {
                "[LOCATION]"
            } else {
                document.incident_location.as_str()
            };
            let description = if document.description.trim().is_empty() {
                "[DESCRIPTION TO BE ADDED]"
            } else {
                document.description.as_str()
            };
            format!(
                "On {}, at {}, the following events occurred: {}",
                date, location, description
            )
        }
        SectionType::Claims => "COUNT I - VIOLATION OF CIVIL RIGHTS (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's constitutional rights by [SPECIFIC VIOLATIONS TO BE DETAILED].".to_string(),
        SectionType::Prayer => "WHEREFORE, Plaintiff respectfully requests that this Court:\na) Award compensatory and punitive damages;\nb) Enter injunctive relief;\nc) Award attorney's fees and costs pursuant to 42 U.S.C. § 1988;\nd) Grant such other relief as this Court deems just and proper.".to_string(),
        SectionType::JuryDemand => "Plaintiff hereby demands a trial by jury on all issues so triable as a matter of right pursuant to Federal Rule of Civil Procedure 38.".to_string(),
        SectionType::Exhibits => String::new(),
    }
}

/// Section persistence and ordering
#[derive(Debug, Clone)]
pub struct SectionService {
    repo: Repository,
}

impl SectionService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a section or update the existing one of the same type.
    ///
    /// `order` applies only on creation; `None` appends after the last section.
    pub async fn create_or_update_section(
        &self,
        document_id: i64,
        section_type: &str,
        title: &str,
        content: &str,
        order: Option<i64>,
    ) -> Result<(SectionRecord, bool)> {
        let mut upsert = SectionUpsert::new(document_id, section_type, title, content);
        upsert.sort_order = order;
        self.repo.upsert_section(upsert).await
    }

    /// Store a fully specified section, AI metadata included
    pub async fn upsert(&self, section: SectionUpsert) -> Result<(SectionRecord, bool)> {
        self.repo.upsert_section(section).await
    }

    /// Render a template into its section at the standard position
    pub async fn create_section_from_template(
        &self,
        document_id: i64,
        template: &LegalTemplateRecord,
        context: &TemplateContext,
    ) -> Result<(SectionRecord, bool)> {
        let content = render(&template.template_text, &context.to_map());
        let upsert = SectionUpsert::new(
            document_id,
            template.section_type.as_str(),
            SectionType::title_for(&template.section_type),
            content,
        )
        .with_order(SectionType::order_for(&template.section_type));
        self.repo.upsert_section(upsert).await
    }

    pub async fn bulk_generate_sections(
        &self,
        document_id: i64,
        templates: &[LegalTemplateRecord],
        context: &TemplateContext,
    ) -> Result<Vec<GeneratedSection>> {
        let mut results = Vec::with_capacity(templates.len());
        for template in templates {
            let (section, created) = self
                .create_section_from_template(document_id, template, context)
                .await?;
            results.push(GeneratedSection {
                section,
                created,
                template_id: template.id,
            });
        }
        Ok(results)
    }

    /// Move every section to its standard position, returning how many moved
    pub async fn reorder_sections(&self, document_id: i64) -> Result<usize> {
        let sections = self.repo.list_sections(document_id).await?;
        let orders: Vec<(i64, i64)> = sections
            .iter()
            .map(|s| (s, SectionType::order_for(&s.section_type)))
            .filter(|(s, order)| s.sort_order != *order)
            .map(|(s, order)| (s.id, order))
            .collect();

        let changed = self.repo.update_section_orders(orders).await?;
        debug!("Reordered {} sections of document {}", changed, document_id);
        Ok(changed)
    }

    pub async fn delete_section(&self, document_id: i64, section_type: &str) -> Result<bool> {
        self.repo.delete_section(document_id, section_type).await
    }

    /// Sections ordered by position
    pub async fn document_sections(&self, document_id: i64) -> Result<Vec<SectionRecord>> {
        self.repo.list_sections(document_id).await
    }

    pub async fn missing_sections(&self, document_id: i64) -> Result<Vec<MissingSection>> {
        let existing = self.repo.list_sections(document_id).await?;
        Ok(Self::missing_from(&existing))
    }

    fn missing_from(existing: &[SectionRecord]) -> Vec<MissingSection> {
        SectionType::STANDARD
            .iter()
            .filter(|section| !existing.iter().any(|s| s.section_type == section.as_str()))
            .map(|section| MissingSection {
                section_type: section.as_str().to_string(),
                title: section.title().to_string(),
                order: section.standard_order(),
            })
            .collect()
    }

    pub async fn section_statistics(&self, document_id: i64) -> Result<SectionStatistics> {
        let sections = self.repo.list_sections(document_id).await?;
        let missing_sections = Self::missing_from(&sections);
        let total_possible = SectionType::STANDARD.len();
        let present = total_possible - missing_sections.len();

        Ok(SectionStatistics {
            total_sections: sections.len(),
            total_possible,
            completion_percentage: present as f64 / total_possible as f64 * 100.0,
            missing_count: missing_sections.len(),
            sections_by_type: sections
                .iter()
                .map(|s| SectionSummary {
                    section_type: s.section_type.clone(),
                    title: s.title.clone(),
                    order: s.sort_order,
                })
                .collect(),
            missing_sections,
        })
    }

    /// Write boilerplate for all seven standard sections
    pub async fn create_all_default_sections(
        &self,
        document: &DocumentRecord,
        profile: Option<&UserProfileRecord>,
    ) -> Result<DefaultSectionsReport> {
        let mut report = DefaultSectionsReport::default();

        for section in SectionType::STANDARD {
            let content = default_section_content(section, document, profile);
            let (_, created) = self
                .create_or_update_section(
                    document.id,
                    section.as_str(),
                    section.title(),
                    &content,
                    Some(section.standard_order()),
                )
                .await?;

            if created {
                report.sections_created += 1;
            } else {
                report.sections_updated += 1;
            }
            report.total_sections += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::UserRecord;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    async fn service_with_document() -> (SectionService, DocumentRecord) {
        let repo = Repository::new_in_memory().unwrap();
        let user_id = repo
            .create_user(&UserRecord {
                username: "writer".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let mut document = DocumentRecord {
            user_id,
            title: "Doc".to_string(),
            ..Default::default()
        };
        document.id = repo.create_document(&document).await.unwrap();
        (SectionService::new(repo), document)
    }

    #[test]
    fn test_sectionType_titleFor_withUnknown_shouldTitleCase() {
        assert_eq!(SectionType::title_for("facts"), "Statement of Facts");
        assert_eq!(SectionType::title_for("damages_summary"), "Damages Summary");
        assert_eq!(SectionType::order_for("damages_summary"), UNKNOWN_SECTION_ORDER);
        assert_eq!(SectionType::order_for("exhibits"), 8);
    }

    #[test]
    fn test_defaultSectionContent_facts_withMissingFields_shouldUsePlaceholders() {
        let content = default_section_content(SectionType::Facts, &DocumentRecord::default(), None);
        assert_eq!(
            content,
            "On [DATE], at [LOCATION], the following events occurred: [DESCRIPTION TO BE ADDED]"
        );
    }

    #[test]
    fn test_defaultSectionContent_parties_shouldExpandState() {
        let document = DocumentRecord {
            defendants: "Officer Smith".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        };
        let profile = UserProfileRecord {
            state: "NY".to_string(),
            ..Default::default()
        };
        let content = default_section_content(SectionType::Parties, &document, Some(&profile));
        assert_eq!(
            content,
            "Plaintiff is a citizen and resident of New York. Officer Smith are individuals acting under color of state law."
        );
    }

    #[tokio::test]
    async fn test_createAllDefaultSections_twice_shouldUpdateSecondTime() {
        let (service, document) = service_with_document().await;

        let first = service.create_all_default_sections(&document, None).await.unwrap();
        assert_eq!(first.sections_created, 7);
        assert_eq!(first.sections_updated, 0);

        let second = service.create_all_default_sections(&document, None).await.unwrap();
        assert_eq!(second.sections_created, 0);
        assert_eq!(second.sections_updated, 7);

        let sections = service.document_sections(document.id).await.unwrap();
        let orders: Vec<i64> = sections.iter().map(|s| s.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_reorderSections_shouldRestoreStandardOrder() {
        let (service, document) = service_with_document().await;
        service
            .create_or_update_section(document.id, "claims", "Claims for Relief", "c", None)
            .await
            .unwrap();
        service
            .create_or_update_section(document.id, "introduction", "Introduction", "i", None)
            .await
            .unwrap();

        let moved = service.reorder_sections(document.id).await.unwrap();
        assert_eq!(moved, 2);

        let sections = service.document_sections(document.id).await.unwrap();
        assert_eq!(sections[0].section_type, "introduction");
        assert_eq!(sections[0].sort_order, 1);
        assert_eq!(sections[1].sort_order, 5);

        assert_eq!(service.reorder_sections(document.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sectionStatistics_shouldReportMissing() {
        let (service, document) = service_with_document().await;
        service
            .create_or_update_section(document.id, "facts", "Statement of Facts", "f", Some(4))
            .await
            .unwrap();
        service
            .create_or_update_section(document.id, "exhibits", "Exhibits", "e", Some(8))
            .await
            .unwrap();

        let stats = service.section_statistics(document.id).await.unwrap();
        assert_eq!(stats.total_sections, 2);
        assert_eq!(stats.total_possible, 7);
        assert_eq!(stats.missing_count, 6);
        assert!((stats.completion_percentage - 100.0 / 7.0).abs() < 1e-9);
        assert!(!stats.missing_sections.iter().any(|m| m.section_type == "facts"));
    }

    #[tokio::test]
    async fn test_deleteSection_shouldReportWhetherRemoved() {
        let (service, document) = service_with_document().await;
        service
            .create_or_update_section(document.id, "prayer", "Prayer for Relief", "p", None)
            .await
            .unwrap();

        assert!(service.delete_section(document.id, "prayer").await.unwrap());
        assert!(!service.delete_section(document.id, "prayer").await.unwrap());
    }
}

/*!
 * Integration tests for the document pipeline: import, generate, analyze
 */

use anyhow::Result;
use pretty_assertions::assert_eq;
use section1983::analysis::{ForumType, ViolationType};
use section1983::app_config::Config;
use section1983::Controller;

use crate::common;

#[tokio::test]
async fn test_importDocumentFile_withJsonBundle_shouldCreateUserAndDocument() -> Result<()> {
    let controller = common::seeded_controller().await?;
    let temp_dir = common::create_temp_dir()?;
    let json = serde_json::to_string(&common::sample_bundle("filer"))?;
    let path = common::create_test_file(temp_dir.path(), "incident.json", &json)?;

    let imported = controller.import_document_file(&path).await?;
    assert!(imported.user_created);

    let document = controller
        .repository()
        .get_document(imported.document_id)
        .await?
        .expect("document should exist");
    assert_eq!(document.user_id, imported.user_id);
    assert_eq!(document.incident_city, "Pittsburgh");
    Ok(())
}

#[tokio::test]
async fn test_importDocumentFile_withBadJson_shouldFail() -> Result<()> {
    let controller = common::seeded_controller().await?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "[1, 2")?;

    assert!(controller.import_document_file(&path).await.is_err());
    assert!(controller
        .import_document_file(&temp_dir.path().join("missing.json"))
        .await
        .is_err());
    Ok(())
}

#[tokio::test]
async fn test_generate_withoutAi_shouldFillTemplatesAndReportProgress() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    let orchestrator = controller.orchestrator();

    let before = orchestrator.document_analysis(imported.document_id).await?;
    assert_eq!(before.violation_type, ViolationType::InterferenceRecording);
    assert_eq!(before.location_type, ForumType::TraditionalPublicForum);
    assert_eq!(before.current_sections, 0);

    let report = orchestrator.auto_populate_document(imported.document_id, false).await?;
    assert_eq!(report.templates_found, before.available_templates);
    assert_eq!(report.sections_created, report.templates_found);
    assert!(report.sections.iter().any(|s| s.content.contains("Pittsburgh, PA")));

    let stats = controller.sections().section_statistics(imported.document_id).await?;
    assert_eq!(stats.total_sections, report.templates_found);
    assert_eq!(stats.missing_count, stats.total_possible - stats.total_sections);
    assert!(stats.completion_percentage > 0.0 && stats.completion_percentage < 100.0);

    let after = orchestrator.document_analysis(imported.document_id).await?;
    assert_eq!(after.current_sections, report.templates_found);
    assert_eq!(after.missing_sections.len(), stats.missing_count);
    Ok(())
}

#[tokio::test]
async fn test_generate_withoutStructuredAddress_shouldUseFreeTextLocation() -> Result<()> {
    let controller = common::seeded_controller().await?;
    let mut bundle = common::sample_bundle("walker");
    bundle.document.incident_city.clear();
    let imported = controller.import_document(bundle).await?;

    let report = controller
        .orchestrator()
        .auto_populate_document(imported.document_id, false)
        .await?;
    assert!(report
        .sections
        .iter()
        .any(|s| s.content.contains("public sidewalk on Grant Street")));
    assert!(!report.sections.iter().any(|s| s.content.contains("Pittsburgh, PA")));
    Ok(())
}

#[tokio::test]
async fn test_generate_withAiButNoKey_shouldFallBackToTemplates() -> Result<()> {
    let mut config = Config::default();
    config.ai.api_key = String::new();
    let base = common::seeded_controller().await?;
    let controller = Controller::with_repository(config, base.repository().clone());
    let imported = controller.import_document(common::sample_bundle("nokey")).await?;

    // Only meaningful when the environment does not provide a key either
    if controller.config().ai.get_api_key().is_some() {
        return Ok(());
    }

    let report = controller
        .orchestrator()
        .auto_populate_document(imported.document_id, true)
        .await?;
    assert_eq!(report.ai_enhanced_count, 0);
    assert_eq!(report.total_ai_cost, 0.0);
    assert!(report.sections.iter().all(|s| !s.ai_enhanced));
    assert!(report.results_detail.iter().any(|r| r.fallback_reason.is_some()));
    Ok(())
}

#[tokio::test]
async fn test_defaultSections_afterGenerate_shouldCompleteDocument() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    controller
        .orchestrator()
        .auto_populate_document(imported.document_id, false)
        .await?;

    let report = controller.create_default_sections(imported.document_id).await?;
    assert_eq!(report.total_sections, 7);
    assert_eq!(report.sections_created + report.sections_updated, 7);

    let stats = controller.sections().section_statistics(imported.document_id).await?;
    assert_eq!(stats.completion_percentage, 100.0);
    assert!(stats.missing_sections.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_previewSections_shouldMatchTemplatesWithoutWriting() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;

    let previews = controller.orchestrator().preview_sections(imported.document_id).await?;
    assert_eq!(previews.violation_type, ViolationType::InterferenceRecording);
    assert!(!previews.section_previews.is_empty());
    assert!(controller
        .sections()
        .document_sections(imported.document_id)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_updateSpecificSection_shouldRegenerateOnlyThatSection() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    let orchestrator = controller.orchestrator();

    let report = orchestrator
        .update_specific_section(imported.document_id, "claims")
        .await?;
    assert!(report.success);
    assert_eq!(report.created, Some(true));

    let sections = controller.sections().document_sections(imported.document_id).await?;
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section_type, "claims");

    let again = orchestrator
        .update_specific_section(imported.document_id, "claims")
        .await?;
    assert_eq!(again.created, Some(false));
    Ok(())
}

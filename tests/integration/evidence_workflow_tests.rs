/*!
 * Integration tests for the Statement of Facts built from video evidence
 */

use anyhow::Result;
use pretty_assertions::assert_eq;
use section1983::database::models::{EvidenceSegmentRecord, TranscriptQuoteRecord};
use section1983::evidence::NO_SEGMENTS_MESSAGE;

use crate::common;

fn segment(document_id: i64, video: &str, start: &str, end: &str, include: bool) -> EvidenceSegmentRecord {
    EvidenceSegmentRecord {
        document_id,
        youtube_url: format!("https://youtu.be/{}", video),
        start_time: start.to_string(),
        end_time: end.to_string(),
        include_in_complaint: include,
        violation_tags: "first_amendment, retaliation".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generateFacts_withoutSegments_shouldReportMessage() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;

    let facts = controller.evidence().generate_facts_section(imported.document_id).await?;
    assert!(facts.content.is_empty());
    assert_eq!(facts.metadata.error.as_deref(), Some(NO_SEGMENTS_MESSAGE));
    Ok(())
}

#[tokio::test]
async fn test_generateFacts_withQuotesAndExcludedSegments_shouldNumberFacts() -> Result<()> {
    let (controller, imported) = common::controller_with_document().await?;
    let repo = controller.repository();

    let quoted = repo
        .create_segment(&segment(imported.document_id, "abc123", "0:10", "0:45", true))
        .await?;
    repo.create_quote(&TranscriptQuoteRecord {
        segment_id: quoted,
        speaker_name: "Officer Doe".to_string(),
        text: "Turn that camera off".to_string(),
        significance: "Defendant ordered Plaintiff to stop recording".to_string(),
        include_in_document: true,
        ..Default::default()
    })
    .await?;
    repo.create_segment(&segment(imported.document_id, "def456", "1:00", "1:30", true))
        .await?;
    repo.create_segment(&segment(imported.document_id, "abc123", "2:00", "2:30", false))
        .await?;

    let facts = controller.evidence().generate_facts_section(imported.document_id).await?;
    assert!(facts.metadata.error.is_none());
    assert_eq!(facts.metadata.segment_count, 2);
    assert_eq!(facts.metadata.quote_count, 1);
    assert_eq!(facts.metadata.fact_count, 2);
    assert_eq!(facts.metadata.exhibit_count, 2);

    assert!(facts.content.starts_with(
        "1. Defendant ordered Plaintiff to stop recording. Officer Doe stated: \"Turn that camera off\" (Exhibit A, 0:10)."
    ));
    assert!(facts
        .content
        .contains("2. Video evidence from 1:00 to 1:30 documents relevant events. (Exhibit B)."));
    assert!(!facts.content.contains("2:00"));
    assert!(facts.exhibits_list.starts_with("EXHIBIT A: Video Evidence"));
    assert!(facts.exhibits_list.contains("EXHIBIT B: Video Evidence\nURL: https://youtu.be/def456"));
    assert!(facts
        .exhibits_list
        .contains("Description: Video documentation of First Amendment, Retaliation"));
    Ok(())
}

/*!
 * Turns reviewed video evidence into a numbered Statement of Facts.
 *
 * Segments are grouped by video; each video becomes one lettered exhibit
 * (A, B, C, ...) in the order the videos first appear. Every included quote
 * becomes one numbered fact citing its exhibit and start time. A segment with
 * no included quotes still yields a generic fact pointing at the footage.
 */

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::database::models::{EvidenceSegmentRecord, TranscriptQuoteRecord};
use crate::database::Repository;

pub const NO_SEGMENTS_MESSAGE: &str = "No video segments marked for inclusion in complaint";

/// Counts describing a generated facts section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactsMetadata {
    pub segment_count: usize,
    pub quote_count: usize,
    pub fact_count: usize,
    pub exhibit_count: usize,
    /// Set when nothing could be generated
    pub error: Option<String>,
}

/// Generated facts plus the matching exhibit list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactsSection {
    pub content: String,
    pub exhibits_list: String,
    pub metadata: FactsMetadata,
}

impl FactsSection {
    fn failed(message: &str) -> Self {
        Self {
            metadata: FactsMetadata {
                error: Some(message.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A segment with its included quotes
#[derive(Debug, Clone)]
pub struct SegmentEvidence {
    pub segment: EvidenceSegmentRecord,
    pub quotes: Vec<TranscriptQuoteRecord>,
}

struct Exhibit<'a> {
    letter: String,
    url: &'a str,
    segments: Vec<&'a SegmentEvidence>,
}

/// A, B, ... Z, AA, AB, ...
fn exhibit_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    label.iter().rev().collect()
}

fn group_by_video(evidence: &[SegmentEvidence]) -> Vec<Exhibit<'_>> {
    let mut exhibits: Vec<Exhibit<'_>> = Vec::new();
    for item in evidence {
        let url = item.segment.youtube_url.as_str();
        match exhibits.iter_mut().find(|e| e.url == url) {
            Some(exhibit) => exhibit.segments.push(item),
            None => exhibits.push(Exhibit {
                letter: exhibit_letter(exhibits.len()),
                url,
                segments: vec![item],
            }),
        }
    }
    exhibits
}

fn speaker_label(quote: &TranscriptQuoteRecord) -> &str {
    if !quote.speaker_name.trim().is_empty() {
        quote.speaker_name.trim()
    } else if !quote.speaker_role.trim().is_empty() {
        quote.speaker_role.trim()
    } else {
        "Unidentified speaker"
    }
}

/// "first_amendment" -> "First Amendment"
fn title_case(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut at_word_start = true;
    for c in tag.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn collect_tags(tags: &str, into: &mut BTreeSet<String>) {
    for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        into.insert(title_case(tag));
    }
}

fn exhibits_list(exhibits: &[Exhibit<'_>]) -> String {
    exhibits
        .iter()
        .map(|exhibit| {
            let timestamps: Vec<String> = exhibit
                .segments
                .iter()
                .map(|s| format!("{}-{}", s.segment.start_time, s.segment.end_time))
                .collect();

            let mut tags = BTreeSet::new();
            for item in &exhibit.segments {
                for quote in &item.quotes {
                    collect_tags(&quote.violation_tags, &mut tags);
                }
                collect_tags(&item.segment.violation_tags, &mut tags);
            }
            let violations = if tags.is_empty() {
                "Constitutional violations".to_string()
            } else {
                tags.into_iter().collect::<Vec<_>>().join(", ")
            };

            format!(
                "EXHIBIT {}: Video Evidence\nURL: {}\nRelevant Timestamps: {}\nDescription: Video documentation of {}",
                exhibit.letter,
                exhibit.url,
                timestamps.join(", "),
                violations
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the facts section from segments already sorted by URL and start time
pub fn generate_facts_section(evidence: &[SegmentEvidence]) -> FactsSection {
    if evidence.is_empty() {
        return FactsSection::failed(NO_SEGMENTS_MESSAGE);
    }

    let exhibits = group_by_video(evidence);
    let mut facts = Vec::new();
    let mut quote_count = 0;

    for exhibit in &exhibits {
        for item in &exhibit.segments {
            let segment = &item.segment;
            if item.quotes.is_empty() {
                facts.push(format!(
                    "{}. Video evidence from {} to {} documents relevant events. (Exhibit {}).",
                    facts.len() + 1,
                    segment.start_time,
                    segment.end_time,
                    exhibit.letter
                ));
                continue;
            }

            for quote in &item.quotes {
                quote_count += 1;
                let significance = quote.significance.trim();
                let lead = if significance.is_empty() {
                    String::new()
                } else {
                    format!("{}. ", significance.trim_end_matches('.'))
                };
                facts.push(format!(
                    "{}. {}{} stated: \"{}\" (Exhibit {}, {}).",
                    facts.len() + 1,
                    lead,
                    speaker_label(quote),
                    quote.text.trim(),
                    exhibit.letter,
                    segment.start_time
                ));
            }
        }
    }

    debug!("Generated {} facts across {} exhibits", facts.len(), exhibits.len());

    FactsSection {
        content: facts.join("\n\n"),
        exhibits_list: exhibits_list(&exhibits),
        metadata: FactsMetadata {
            segment_count: evidence.len(),
            quote_count,
            fact_count: facts.len(),
            exhibit_count: exhibits.len(),
            error: None,
        },
    }
}

/// Loads a document's evidence and renders its facts section
#[derive(Debug, Clone)]
pub struct EvidenceService {
    repo: Repository,
}

impl EvidenceService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Included segments with their included quotes
    pub async fn load_evidence(&self, document_id: i64) -> Result<Vec<SegmentEvidence>> {
        let segments = self.repo.included_segments(document_id).await?;
        let mut evidence = Vec::with_capacity(segments.len());
        for segment in segments {
            let quotes = self.repo.included_quotes(segment.id).await?;
            evidence.push(SegmentEvidence { segment, quotes });
        }
        Ok(evidence)
    }

    pub async fn generate_facts_section(&self, document_id: i64) -> Result<FactsSection> {
        let evidence = self.load_evidence(document_id).await?;
        let section = generate_facts_section(&evidence);
        match &section.metadata.error {
            Some(error) => info!("No facts generated for document {}: {}", document_id, error),
            None => info!(
                "Generated {} facts for document {}",
                section.metadata.fact_count, document_id
            ),
        }
        Ok(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segment(url: &str, start: &str, end: &str, tags: &str) -> EvidenceSegmentRecord {
        EvidenceSegmentRecord {
            youtube_url: url.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            include_in_complaint: true,
            violation_tags: tags.to_string(),
            ..Default::default()
        }
    }

    fn quote(speaker: &str, text: &str, significance: &str, tags: &str) -> TranscriptQuoteRecord {
        TranscriptQuoteRecord {
            speaker_name: speaker.to_string(),
            text: text.to_string(),
            significance: significance.to_string(),
            include_in_document: true,
            violation_tags: tags.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_withNoSegments_shouldReportError() {
        let section = generate_facts_section(&[]);
        assert!(section.is_empty());
        assert_eq!(section.metadata.error.as_deref(), Some(NO_SEGMENTS_MESSAGE));
    }

    #[test]
    fn test_generate_shouldNumberFactsAndLetterExhibits() {
        let evidence = vec![
            SegmentEvidence {
                segment: segment("https://youtu.be/aaa", "0:10", "0:40", "first_amendment"),
                quotes: vec![
                    quote(
                        "Officer Doe",
                        "Turn that camera off",
                        "Defendant ordered Plaintiff to stop recording",
                        "prior_restraint, first_amendment",
                    ),
                    quote("Plaintiff", "I am on a public sidewalk", "", ""),
                ],
            },
            SegmentEvidence {
                segment: segment("https://youtu.be/aaa", "2:00", "2:30", ""),
                quotes: vec![],
            },
            SegmentEvidence {
                segment: segment("https://youtu.be/bbb", "1:05", "1:20", ""),
                quotes: vec![],
            },
        ];

        let section = generate_facts_section(&evidence);
        let expected = "1. Defendant ordered Plaintiff to stop recording. Officer Doe stated: \"Turn that camera off\" (Exhibit A, 0:10).\n\n\
2. Plaintiff stated: \"I am on a public sidewalk\" (Exhibit A, 0:10).\n\n\
3. Video evidence from 2:00 to 2:30 documents relevant events. (Exhibit A).\n\n\
4. Video evidence from 1:05 to 1:20 documents relevant events. (Exhibit B).";
        assert_eq!(section.content, expected);
        assert_eq!(
            section.metadata,
            FactsMetadata {
                segment_count: 3,
                quote_count: 2,
                fact_count: 4,
                exhibit_count: 2,
                error: None,
            }
        );

        let expected_exhibits = "EXHIBIT A: Video Evidence\nURL: https://youtu.be/aaa\nRelevant Timestamps: 0:10-0:40, 2:00-2:30\nDescription: Video documentation of First Amendment, Prior Restraint\n\n\
EXHIBIT B: Video Evidence\nURL: https://youtu.be/bbb\nRelevant Timestamps: 1:05-1:20\nDescription: Video documentation of Constitutional violations";
        assert_eq!(section.exhibits_list, expected_exhibits);
    }

    #[test]
    fn test_exhibitLetter_shouldContinuePastZ() {
        assert_eq!(exhibit_letter(0), "A");
        assert_eq!(exhibit_letter(25), "Z");
        assert_eq!(exhibit_letter(26), "AA");
        assert_eq!(exhibit_letter(27), "AB");
    }

    #[test]
    fn test_titleCase_shouldMatchDisplayTags() {
        assert_eq!(title_case("first_amendment"), "First Amendment");
        assert_eq!(title_case("FOURTH_amendment"), "Fourth Amendment");
    }

    #[tokio::test]
    async fn test_service_shouldSkipExcludedEvidence() {
        let repo = Repository::new_in_memory().unwrap();
        let user_id = repo
            .create_user(&crate::database::models::UserRecord {
                username: "jroe".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let document_id = repo
            .create_document(&crate::database::models::DocumentRecord {
                user_id,
                title: "Roe v. Doe".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let service = EvidenceService::new(repo.clone());
        let section = service.generate_facts_section(document_id).await.unwrap();
        assert_eq!(section.metadata.error.as_deref(), Some(NO_SEGMENTS_MESSAGE));

        let mut included = segment("https://youtu.be/aaa", "0:10", "0:40", "");
        included.document_id = document_id;
        let segment_id = repo.create_segment(&included).await.unwrap();

        let mut excluded = segment("https://youtu.be/zzz", "0:00", "0:05", "");
        excluded.document_id = document_id;
        excluded.include_in_complaint = false;
        repo.create_segment(&excluded).await.unwrap();

        let mut kept = quote("Officer Doe", "Stop filming", "", "");
        kept.segment_id = segment_id;
        repo.create_quote(&kept).await.unwrap();
        let mut dropped = quote("Officer Roe", "Off the record", "", "");
        dropped.segment_id = segment_id;
        dropped.include_in_document = false;
        repo.create_quote(&dropped).await.unwrap();

        let section = service.generate_facts_section(document_id).await.unwrap();
        assert_eq!(
            section.content,
            "1. Officer Doe stated: \"Stop filming\" (Exhibit A, 0:10)."
        );
        assert_eq!(section.metadata.exhibit_count, 1);
    }
}

//! Checks applied to model output before it may replace template text

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::sections::SectionType;

pub const MIN_OUTPUT_CHARS: usize = 100;
pub const MAX_OUTPUT_CHARS: usize = 3000;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[.*?\]|\{.*?\}|TODO|TBD|PLACEHOLDER").unwrap());
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static REPORTER_CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+ F\.\d+d \d+").unwrap());
static FIRST_PERSON: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(I|me|my|we|our)\b").unwrap());

/// Why generated text was thrown away
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputRejection {
    #[error("Output too short")]
    TooShort,

    #[error("Output too long")]
    TooLong,

    #[error("Contains placeholders")]
    Placeholders,

    #[error("Contains HTML/XML tags")]
    MarkupTags,

    #[error("Missing required statutory reference")]
    MissingStatute,

    #[error("Lost case citations from template")]
    LostCitations,

    #[error("Contains first person pronouns (should be third person)")]
    FirstPerson,
}

/// Validate generated text for a section against its source template
pub fn validate_output(
    content: &str,
    section_type: &str,
    template_text: &str,
) -> Result<(), OutputRejection> {
    let length = content.chars().count();
    if length < MIN_OUTPUT_CHARS {
        return Err(OutputRejection::TooShort);
    }
    if length > MAX_OUTPUT_CHARS {
        return Err(OutputRejection::TooLong);
    }
    if PLACEHOLDER.is_match(content) {
        return Err(OutputRejection::Placeholders);
    }
    if MARKUP_TAG.is_match(content) {
        return Err(OutputRejection::MarkupTags);
    }

    match section_type.parse::<SectionType>() {
        Ok(SectionType::Claims) => {
            if !content.contains("§ 1983") {
                return Err(OutputRejection::MissingStatute);
            }
            if REPORTER_CITATION.is_match(template_text) && !REPORTER_CITATION.is_match(content) {
                return Err(OutputRejection::LostCitations);
            }
        }
        Ok(SectionType::Facts) => {
            if FIRST_PERSON.is_match(content) {
                return Err(OutputRejection::FirstPerson);
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTS: &str = "On January 2, 2024, Plaintiff was lawfully present on the public sidewalk outside City Hall. \
Plaintiff was recording officers performing their duties when Defendant ordered Plaintiff to stop.";

    const CLAIMS: &str = "COUNT I - First Amendment Retaliation under 42 U.S.C. § 1983. Defendants violated \
Plaintiff's clearly established right to record police in public, as recognized in Glik v. Cunniffe, 655 F.3d 78 (1st Cir. 2011).";

    #[test]
    fn test_validate_withCleanFacts_shouldPass() {
        assert_eq!(validate_output(FACTS, "facts", ""), Ok(()));
    }

    #[test]
    fn test_validate_withShortOrLongText_shouldReject() {
        assert_eq!(validate_output("Too short.", "facts", ""), Err(OutputRejection::TooShort));
        let long = "a".repeat(MAX_OUTPUT_CHARS + 1);
        assert_eq!(validate_output(&long, "facts", ""), Err(OutputRejection::TooLong));
    }

    #[test]
    fn test_validate_withPlaceholder_shouldReject() {
        let content = format!("{} Defendant [NAME] was present.", FACTS);
        assert_eq!(validate_output(&content, "introduction", ""), Err(OutputRejection::Placeholders));
        let content = format!("{} More details tbd.", FACTS);
        assert_eq!(validate_output(&content, "introduction", ""), Err(OutputRejection::Placeholders));
    }

    #[test]
    fn test_validate_withHtml_shouldReject() {
        let content = format!("<p>{}</p>", FACTS);
        assert_eq!(validate_output(&content, "introduction", ""), Err(OutputRejection::MarkupTags));
    }

    #[test]
    fn test_validate_withFirstPersonFacts_shouldReject() {
        let content = format!("{} Then I left the area.", FACTS);
        assert_eq!(validate_output(&content, "facts", ""), Err(OutputRejection::FirstPerson));
        // Only facts are held to third person
        assert_eq!(validate_output(&content, "introduction", ""), Ok(()));
    }

    #[test]
    fn test_validate_withClaims_shouldRequireStatuteAndCitations() {
        assert_eq!(validate_output(CLAIMS, "claims", CLAIMS), Ok(()));

        let no_statute = CLAIMS.replace("§ 1983", "section nineteen eighty-three");
        assert_eq!(validate_output(&no_statute, "claims", CLAIMS), Err(OutputRejection::MissingStatute));

        let no_citation = CLAIMS.replace("655 F.3d 78", "the First Circuit decision");
        assert_eq!(validate_output(&no_citation, "claims", CLAIMS), Err(OutputRejection::LostCitations));
        assert_eq!(validate_output(&no_citation, "claims", "No citations here"), Ok(()));
    }
}

/*!
 * Violation and forum classification.
 *
 * Incident descriptions and locations are matched against ordered phrase
 * tables. The first rule with a phrase contained in the lowercased input
 * wins; when nothing matches the default label is returned, so
 * classification never fails.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::database::models::DocumentRecord;

/// Category of alleged civil-rights violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Officials stopped or blocked a recording
    InterferenceRecording,
    /// Plaintiff was removed from a public area
    ForcedToLeavePublic,
    /// Adverse action because of earlier protected speech
    RetaliationProtectedSpeech,
    /// Plaintiff was threatened with arrest
    #[default]
    ThreatenedArrestPublic,
}

/// First Amendment forum category of the incident location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForumType {
    #[default]
    TraditionalPublicForum,
    DesignatedPublicForum,
    LimitedPublicForum,
}

/// Violation rules in evaluation order. Threatened arrest is checked last.
const VIOLATION_RULES: &[(ViolationType, &[&str])] = &[
    (
        ViolationType::InterferenceRecording,
        &[
            "recording",
            "filming",
            "camera",
            "video",
            "stopped recording",
            "blocked camera",
            "interfered with recording",
            "cant record",
            "no filming",
            "no cameras",
            "put camera away",
            "stop recording",
            "turn off camera",
            "no video",
            "cant film",
            "photography",
            "taking pictures",
            "photos",
            "picture taking",
        ],
    ),
    (
        ViolationType::ForcedToLeavePublic,
        &[
            "kicked out",
            "escorted out",
            "forced to leave",
            "made me leave",
            "told to leave",
            "removed from",
            "excluded from",
            "banned from",
            "not allowed",
            "get out",
            "you need to leave",
            "asked to leave",
            "escorted away",
            "thrown out",
            "pushed out",
            "ordered to leave",
        ],
    ),
    (
        ViolationType::RetaliationProtectedSpeech,
        &[
            "retaliation",
            "retaliated",
            "because i complained",
            "payback",
            "got back at me",
            "targeted me",
            "harassment",
            "followed up",
            "came back",
            "returned later",
            "next time",
            "remembered me",
            "harassed",
            "singled out",
            "revenge",
            "got even",
            "punishment",
        ],
    ),
    (
        ViolationType::ThreatenedArrestPublic,
        &[
            "threatened",
            "threat",
            "will arrest",
            "going to arrest",
            "arrest you if",
            "said he would",
            "warned me",
            "told me i would be arrested",
            "threatened to arrest",
            "said i would go to jail",
            "going to jail",
            "youre under arrest if",
            "arrest threat",
            "warned of arrest",
        ],
    ),
];

/// Forum rules in evaluation order
const FORUM_RULES: &[(ForumType, &[&str])] = &[
    (
        ForumType::TraditionalPublicForum,
        &[
            "sidewalk",
            "street",
            "plaza",
            "park",
            "courthouse steps",
            "public square",
            "town square",
            "public walkway",
            "street corner",
            "parking lot",
            "public parking",
            "outside",
            "front of building",
            "public area",
            "crosswalk",
            "intersection",
        ],
    ),
    (
        ForumType::DesignatedPublicForum,
        &[
            "city hall",
            "dmv",
            "government building",
            "public meeting",
            "courthouse",
            "municipal building",
            "town hall",
            "civic center",
            "public library",
            "community center",
            "government office",
            "county building",
            "federal building",
            "state building",
        ],
    ),
    (
        ForumType::LimitedPublicForum,
        &[
            "lobby",
            "waiting area",
            "public counter",
            "service window",
            "reception area",
            "public entrance",
            "foyer",
            "vestibule",
            "public restroom",
            "elevator",
            "hallway",
        ],
    ),
];

/// First rule whose phrase list has a hit in `text`
fn first_match<T: Copy>(rules: &[(T, &[&str])], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|phrase| lowered.contains(phrase)))
        .map(|(label, _)| *label)
}

/// Classify an incident description into a violation type.
///
/// Empty input and inputs matching no phrase both yield
/// [`ViolationType::ThreatenedArrestPublic`].
pub fn classify_violation(description: Option<&str>) -> ViolationType {
    match description {
        Some(text) if !text.trim().is_empty() => {
            first_match(VIOLATION_RULES, text).unwrap_or_default()
        }
        _ => ViolationType::default(),
    }
}

/// Classify an incident location into a forum type.
///
/// Defaults to the traditional public forum, the most protective standard.
pub fn classify_location(location: Option<&str>) -> ForumType {
    match location {
        Some(text) if !text.trim().is_empty() => first_match(FORUM_RULES, text).unwrap_or_default(),
        _ => ForumType::default(),
    }
}

/// Text the forum classifier sees for a document.
///
/// The free-text location wins; otherwise the structured address parts are
/// joined with ", ".
pub fn classification_location(document: &DocumentRecord) -> String {
    if !document.incident_location.trim().is_empty() {
        return document.incident_location.trim().to_string();
    }
    [
        document.incident_street_address.as_str(),
        document.incident_city.as_str(),
        document.incident_state.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<&str>>()
    .join(", ")
}

/// Classify a stored document by its description and location
pub fn classify_document(document: &DocumentRecord) -> (ViolationType, ForumType) {
    let location = classification_location(document);
    (
        classify_violation(Some(&document.description)),
        classify_location(Some(&location)),
    )
}

impl ViolationType {
    pub const ALL: [ViolationType; 4] = [
        ViolationType::InterferenceRecording,
        ViolationType::ForcedToLeavePublic,
        ViolationType::RetaliationProtectedSpeech,
        ViolationType::ThreatenedArrestPublic,
    ];

    /// Storage label
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::InterferenceRecording => "interference_recording",
            ViolationType::ForcedToLeavePublic => "forced_to_leave_public",
            ViolationType::RetaliationProtectedSpeech => "retaliation_protected_speech",
            ViolationType::ThreatenedArrestPublic => "threatened_arrest_public",
        }
    }

    /// Human-readable label
    pub fn description(&self) -> &'static str {
        match self {
            ViolationType::InterferenceRecording => "Interference with Recording",
            ViolationType::ForcedToLeavePublic => "Forced Removal from Public Area",
            ViolationType::RetaliationProtectedSpeech => "Retaliation for Protected Speech",
            ViolationType::ThreatenedArrestPublic => "Threatened Arrest in Public Area",
        }
    }
}

impl ForumType {
    pub const ALL: [ForumType; 3] = [
        ForumType::TraditionalPublicForum,
        ForumType::DesignatedPublicForum,
        ForumType::LimitedPublicForum,
    ];

    /// Storage label
    pub fn as_str(&self) -> &'static str {
        match self {
            ForumType::TraditionalPublicForum => "traditional_public_forum",
            ForumType::DesignatedPublicForum => "designated_public_forum",
            ForumType::LimitedPublicForum => "limited_public_forum",
        }
    }

    /// Human-readable label
    pub fn description(&self) -> &'static str {
        match self {
            ForumType::TraditionalPublicForum => "Traditional Public Forum",
            ForumType::DesignatedPublicForum => "Designated Public Forum",
            ForumType::LimitedPublicForum => "Limited Public Forum",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ForumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViolationType::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Invalid violation type: {}", s))
    }
}

impl FromStr for ForumType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForumType::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Invalid forum type: {}", s))
    }
}

/// Description for a stored violation label, title-casing unknown labels
pub fn violation_description(label: &str) -> String {
    match label.parse::<ViolationType>() {
        Ok(violation) => violation.description().to_string(),
        Err(_) => title_case_label(label),
    }
}

/// Description for a stored forum label, title-casing unknown labels
pub fn forum_description(label: &str) -> String {
    match label.parse::<ForumType>() {
        Ok(forum) => forum.description().to_string(),
        Err(_) => title_case_label(label),
    }
}

/// `jury_demand` -> `Jury Demand`
pub fn title_case_label(label: &str) -> String {
    label
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifyViolation_withRecordingPhrase_shouldReturnInterference() {
        assert_eq!(
            classify_violation(Some("The officer told me to put camera away")),
            ViolationType::InterferenceRecording
        );
    }

    #[test]
    fn test_classifyViolation_withRecordingAndRemoval_shouldPreferRecording() {
        assert_eq!(
            classify_violation(Some("I was kicked out for filming")),
            ViolationType::InterferenceRecording
        );
    }

    #[test]
    fn test_classifyViolation_withThreatAndRetaliation_shouldPreferRetaliation() {
        assert_eq!(
            classify_violation(Some("He threatened me as payback")),
            ViolationType::RetaliationProtectedSpeech
        );
    }

    #[test]
    fn test_classifyViolation_withEmptyInput_shouldReturnDefault() {
        assert_eq!(classify_violation(None), ViolationType::ThreatenedArrestPublic);
        assert_eq!(classify_violation(Some("   ")), ViolationType::ThreatenedArrestPublic);
        assert_eq!(classify_violation(Some("nothing relevant")), ViolationType::ThreatenedArrestPublic);
    }

    #[test]
    fn test_classifyViolation_withUppercasePronoun_shouldMatchLowercasedPhrase() {
        assert_eq!(
            classify_violation(Some("They did this because I complained")),
            ViolationType::RetaliationProtectedSpeech
        );
        assert_eq!(
            classify_violation(Some("The sergeant told me I would be arrested")),
            ViolationType::ThreatenedArrestPublic
        );
        assert_eq!(
            classify_violation(Some("He said I would go to jail")),
            ViolationType::ThreatenedArrestPublic
        );
    }

    #[test]
    fn test_classifyLocation_shouldFollowTableOrder() {
        assert_eq!(classify_location(Some("Sidewalk in front of City Hall")), ForumType::TraditionalPublicForum);
        assert_eq!(classify_location(Some("Inside the DMV")), ForumType::DesignatedPublicForum);
        assert_eq!(classify_location(Some("the hallway")), ForumType::LimitedPublicForum);
    }

    #[test]
    fn test_classifyLocation_withNoMatch_shouldReturnTraditional() {
        assert_eq!(classify_location(Some("Room 12")), ForumType::TraditionalPublicForum);
        assert_eq!(classify_location(None), ForumType::TraditionalPublicForum);
    }

    #[test]
    fn test_fromStr_shouldRoundTripLabels() {
        for violation in ViolationType::ALL {
            assert_eq!(violation.as_str().parse::<ViolationType>().unwrap(), violation);
        }
        for forum in ForumType::ALL {
            assert_eq!(forum.to_string().parse::<ForumType>().unwrap(), forum);
        }
    }

    #[test]
    fn test_classifyDocument_withStructuredAddressOnly_shouldUseAddress() {
        let document = DocumentRecord {
            description: "Deputy ordered me to stop filming".to_string(),
            incident_street_address: "1 Main St".to_string(),
            incident_city: "Erie".to_string(),
            incident_state: "PA".to_string(),
            ..Default::default()
        };
        assert_eq!(classification_location(&document), "1 Main St, Erie, PA");
        assert_eq!(
            classify_document(&document),
            (ViolationType::InterferenceRecording, ForumType::TraditionalPublicForum)
        );
    }

    #[test]
    fn test_titleCaseLabel_shouldCapitalizeWords() {
        assert_eq!(title_case_label("jury_demand"), "Jury Demand");
        assert_eq!(violation_description("custom_claim"), "Custom Claim");
    }
}

/*!
 * Federal district court lookup.
 *
 * A location is placed by walking a state's table through a fixed cascade:
 * exact city, county, keyword heuristics, then the state's default court.
 * The step that matched decides the [`Confidence`] reported to the user.
 */

pub mod regional;
pub mod states;
pub mod table;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{CourtLookupError, ManualCourtError};
use crate::jurisdiction::UsState;
use table::{MatchKind, StateCourtTable};

pub use table::{District, KeywordPattern, Placement};

/// Minimum length of a hand-typed court caption
const MIN_MANUAL_COURT_LEN: usize = 10;

/// How sure the lookup is about the court it picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    Manual,
    None,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Manual => "manual",
            Confidence::None => "none",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Confidence::High => "High confidence - Location matches known court division or county",
            Confidence::Medium => "Medium confidence - Location matches geographic patterns",
            Confidence::Low => "Low confidence - Using default district for state, please verify",
            Confidence::Manual => "Manually selected by user",
            Confidence::None => "Unable to determine court location",
        }
    }

    fn from_match(kind: MatchKind) -> Self {
        match kind {
            MatchKind::City | MatchKind::County => Confidence::High,
            MatchKind::Keyword => Confidence::Medium,
            MatchKind::Default => Confidence::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description for a confidence label as stored on a document
pub fn confidence_description(label: &str) -> &'static str {
    match label.trim().to_lowercase().as_str() {
        "high" => Confidence::High.description(),
        "medium" => Confidence::Medium.description(),
        "low" => Confidence::Low.description(),
        "manual" => Confidence::Manual.description(),
        "none" => Confidence::None.description(),
        _ => "Unknown confidence level",
    }
}

/// A placed court
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourtMatch {
    pub district: String,
    pub division: String,
    pub state_name: String,
    pub confidence: Confidence,
    pub formatted_court: String,
}

/// JSON shape handed to callers that want a flag instead of a `Result`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourtLookupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_court: Option<String>,
    pub confidence_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<CourtMatch, CourtLookupError>> for CourtLookupResponse {
    fn from(result: Result<CourtMatch, CourtLookupError>) -> Self {
        match result {
            Ok(found) => Self {
                success: true,
                confidence_description: found.confidence.description().to_string(),
                confidence: found.confidence,
                district: Some(found.district),
                division: Some(found.division),
                state_name: Some(found.state_name),
                formatted_court: Some(found.formatted_court),
                error: None,
            },
            Err(e) => Self {
                success: false,
                district: None,
                division: None,
                state_name: None,
                confidence: Confidence::None,
                formatted_court: None,
                confidence_description: Confidence::None.description().to_string(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// One district as listed for a state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictInfo {
    pub name: String,
    pub divisions: Vec<String>,
    pub counties: Vec<String>,
    pub major_cities: Vec<String>,
}

impl From<&District> for DistrictInfo {
    fn from(district: &District) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            name: district.name.to_string(),
            divisions: owned(district.divisions),
            counties: owned(district.counties),
            major_cities: owned(district.major_cities),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateDistricts {
    pub state_name: String,
    pub districts: Vec<DistrictInfo>,
}

/// Court table for a state, if one exists
pub fn table_for(state: UsState) -> Option<&'static StateCourtTable> {
    match state {
        UsState::NY => Some(&states::NEW_YORK),
        UsState::PA => Some(&states::PENNSYLVANIA),
        _ => regional::MIDWEST
            .iter()
            .chain(regional::NORTHEAST)
            .find(|table| table.state == state),
    }
}

fn resolve_table(state: &str) -> Result<&'static StateCourtTable, CourtLookupError> {
    let code = state.trim().to_uppercase();
    code.parse::<UsState>()
        .ok()
        .and_then(table_for)
        .ok_or(CourtLookupError::UnsupportedState(code))
}

/// Caption block for the top of a complaint
pub fn format_court_name(district: &str, division: &str) -> String {
    format!(
        "UNITED STATES DISTRICT COURT\n{}\n{} DIVISION",
        district.to_uppercase(),
        division.to_uppercase()
    )
}

/// Find the federal court for a city and state, optionally helped by a county
pub fn lookup_court_by_location(
    city: &str,
    state: &str,
    county: Option<&str>,
) -> Result<CourtMatch, CourtLookupError> {
    if city.trim().is_empty() || state.trim().is_empty() {
        return Err(CourtLookupError::MissingLocation);
    }

    let table = resolve_table(state)?;
    let (district, division, kind) = table.place(city, county);
    let confidence = Confidence::from_match(kind);
    debug!(
        "Placed {}, {} in {} / {} ({:?})",
        city.trim(),
        table.state,
        district,
        division,
        kind
    );

    Ok(CourtMatch {
        district: district.to_string(),
        division: division.to_string(),
        state_name: table.name().to_string(),
        confidence,
        formatted_court: format_court_name(district, division),
    })
}

/// States that have a court table
pub fn supported_states() -> Vec<UsState> {
    let mut supported: Vec<UsState> = UsState::ALL
        .iter()
        .copied()
        .filter(|state| table_for(*state).is_some())
        .collect();
    supported.sort_by_key(|state| state.code());
    supported
}

/// Every district (with divisions and counties) of a state
pub fn all_districts_for_state(state: &str) -> Result<StateDistricts, CourtLookupError> {
    let table = resolve_table(state)?;
    Ok(StateDistricts {
        state_name: table.name().to_string(),
        districts: table.districts.iter().map(DistrictInfo::from).collect(),
    })
}

/// Check a court caption typed by the user and return it trimmed
pub fn validate_manual_court_entry(text: &str) -> Result<String, ManualCourtError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_MANUAL_COURT_LEN {
        return Err(ManualCourtError::TooShort);
    }

    let upper = trimmed.to_uppercase();
    if !upper.contains("DISTRICT COURT") {
        return Err(ManualCourtError::MissingDistrictCourt);
    }
    if !upper.contains("UNITED STATES") {
        return Err(ManualCourtError::MissingUnitedStates);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_withMappedCity_shouldBeHighConfidence() {
        let found = lookup_court_by_location("Pittsburgh", "PA", None).unwrap();
        assert_eq!(found.district, "Western District of Pennsylvania");
        assert_eq!(found.division, "Pittsburgh");
        assert_eq!(found.state_name, "Pennsylvania");
        assert_eq!(found.confidence, Confidence::High);
    }

    #[test]
    fn test_lookup_withLowercaseInput_shouldStillMatch() {
        let found = lookup_court_by_location("  buffalo ", "ny", None).unwrap();
        assert_eq!(found.district, "Western District of New York");
        assert_eq!(found.division, "Buffalo");
        assert_eq!(found.confidence, Confidence::High);
    }

    #[test]
    fn test_lookup_withCountySuffix_shouldMatchCounty() {
        let found = lookup_court_by_location("Millcreek", "PA", Some("Erie County")).unwrap();
        assert_eq!(found.district, "Western District of Pennsylvania");
        assert_eq!(found.division, "Erie");
        assert_eq!(found.confidence, Confidence::High);
    }

    #[test]
    fn test_lookup_withKeywordOnly_shouldBeMediumConfidence() {
        let found = lookup_court_by_location("Long Island City", "NY", None).unwrap();
        assert_eq!(found.district, "Eastern District of New York");
        assert_eq!(found.division, "Brooklyn");
        assert_eq!(found.confidence, Confidence::Medium);
    }

    #[test]
    fn test_lookup_withUnknownCity_shouldUseStateDefault() {
        let found = lookup_court_by_location("Smallville", "NY", None).unwrap();
        assert_eq!(found.district, "Southern District of New York");
        assert_eq!(found.division, "Manhattan");
        assert_eq!(found.confidence, Confidence::Low);
    }

    #[test]
    fn test_lookup_withRegionalState_shouldUseCountyList() {
        let found = lookup_court_by_location("Evanston", "IL", Some("Cook")).unwrap();
        assert_eq!(found.district, "Northern District of Illinois");
        assert_eq!(found.division, "Chicago");
        assert_eq!(found.confidence, Confidence::High);

        let fallback = lookup_court_by_location("Hoboken", "NJ", Some("Hudson")).unwrap();
        assert_eq!(fallback.division, "Newark");
        assert_eq!(fallback.confidence, Confidence::Low);
    }

    #[test]
    fn test_lookup_withFullStateName_shouldMatchLikeAbbreviation() {
        let found = lookup_court_by_location("Pittsburgh", "pennsylvania", None).unwrap();
        assert_eq!(found.district, "Western District of Pennsylvania");
        assert_eq!(found.state_name, "Pennsylvania");

        let districts = all_districts_for_state("New York").unwrap();
        assert_eq!(districts.districts.len(), 4);
    }

    #[test]
    fn test_lookup_withUnsupportedState_shouldFail() {
        let err = lookup_court_by_location("Austin", "tx", None).unwrap_err();
        assert_eq!(err, CourtLookupError::UnsupportedState("TX".to_string()));
        assert_eq!(err.to_string(), "State TX not yet supported in court database");
    }

    #[test]
    fn test_lookup_withBlankCity_shouldFail() {
        let err = lookup_court_by_location("  ", "PA", None).unwrap_err();
        assert_eq!(err, CourtLookupError::MissingLocation);
    }

    #[test]
    fn test_formattedCourt_shouldUppercaseCaption() {
        let found = lookup_court_by_location("Harrisburg", "PA", None).unwrap();
        assert_eq!(
            found.formatted_court,
            "UNITED STATES DISTRICT COURT\nMIDDLE DISTRICT OF PENNSYLVANIA\nHARRISBURG DIVISION"
        );
    }

    #[test]
    fn test_response_fromError_shouldCarryNoneConfidence() {
        let response = CourtLookupResponse::from(lookup_court_by_location("Austin", "TX", None));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["confidence"], "none");
        assert_eq!(json["error"], "State TX not yet supported in court database");
        assert!(json.get("district").is_none());
    }

    #[test]
    fn test_supportedStates_shouldIncludeRegionalTables() {
        let supported = supported_states();
        assert_eq!(supported.len(), 17);
        assert!(supported.contains(&UsState::NY));
        assert!(supported.contains(&UsState::KS));
        assert!(!supported.contains(&UsState::CA));
    }

    #[test]
    fn test_allDistricts_shouldListEveryDistrict() {
        let listing = all_districts_for_state("ny").unwrap();
        assert_eq!(listing.state_name, "New York");
        assert_eq!(listing.districts.len(), 4);
        assert_eq!(listing.districts[0].divisions, vec!["Manhattan", "White Plains"]);
    }

    #[test]
    fn test_confidenceDescription_withUnknownLabel_shouldSayUnknown() {
        assert_eq!(confidence_description("manual"), "Manually selected by user");
        assert_eq!(confidence_description("bogus"), "Unknown confidence level");
    }

    #[test]
    fn test_validateManualCourt_shouldCheckRequiredWords() {
        assert_eq!(validate_manual_court_entry("short"), Err(ManualCourtError::TooShort));
        assert_eq!(
            validate_manual_court_entry("United States Court of Appeals"),
            Err(ManualCourtError::MissingDistrictCourt)
        );
        assert_eq!(
            validate_manual_court_entry("Federal District Court of Ohio"),
            Err(ManualCourtError::MissingUnitedStates)
        );
        assert_eq!(
            validate_manual_court_entry("  United States District Court for the District of Delaware "),
            Ok("United States District Court for the District of Delaware".to_string())
        );
    }
}

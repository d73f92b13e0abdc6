/*!
 * Tests for the court lookup surface used by the CLI
 */

use pretty_assertions::assert_eq;
use section1983::court::{
    all_districts_for_state, lookup_court_by_location, supported_states, validate_manual_court_entry,
    Confidence, CourtLookupResponse,
};

#[test]
fn test_lookupResponse_withMatch_shouldCarryCourtFields() {
    let response = CourtLookupResponse::from(lookup_court_by_location("Pittsburgh", "Pennsylvania", None));
    assert!(response.success);
    assert_eq!(response.district.as_deref(), Some("Western District of Pennsylvania"));
    assert_eq!(response.confidence, Confidence::High);
    assert!(response.error.is_none());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["confidence"], "high");
    assert!(json.get("error").is_none());
}

#[test]
fn test_lookupResponse_withUnsupportedState_shouldReportError() {
    let response = CourtLookupResponse::from(lookup_court_by_location("Austin", "TX", None));
    assert!(!response.success);
    assert_eq!(response.confidence, Confidence::None);
    assert_eq!(
        response.error.as_deref(),
        Some("State TX not yet supported in court database")
    );

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("district").is_none());
}

#[test]
fn test_supportedStates_shouldIncludeTableStates() {
    let codes: Vec<String> = supported_states().iter().map(|s| s.code()).collect();
    assert!(codes.iter().any(|c| c == "NY"));
    assert!(codes.iter().any(|c| c == "PA"));
    assert!(!codes.iter().any(|c| c == "TX"));
}

#[test]
fn test_allDistricts_forNewYork_shouldListFourDistricts() {
    let districts = all_districts_for_state("NY").unwrap();
    assert_eq!(districts.state_name, "New York");
    assert_eq!(districts.districts.len(), 4);
    assert!(all_districts_for_state("ZZ").is_err());
}

#[test]
fn test_manualEntry_shouldRequireFederalCourtWording() {
    assert!(validate_manual_court_entry("United States District Court for the District of Vermont").is_ok());
    assert!(validate_manual_court_entry("short").is_err());
    assert!(validate_manual_court_entry("Superior Court of Vermont").is_err());
}

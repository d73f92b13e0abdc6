/*!
 * Rendering context built from a document and its owner.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::models::{DocumentRecord, UserProfileRecord, UserRecord};
use crate::jurisdiction::full_state_name;

/// Text used in pleadings for the incident date
pub const DATE_DISPLAY_FORMAT: &str = "%B %d, %Y";

/// Values available to `{{ name }}` placeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateContext {
    pub plaintiff_name: String,
    pub plaintiff_state: String,
    pub incident_date: String,
    pub incident_location: String,
    pub incident_city: String,
    pub incident_state: String,
    pub incident_street_address: String,
    pub defendants: String,
    pub description: String,
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

impl TemplateContext {
    /// Build the context for a document.
    ///
    /// Missing values are replaced with bracketed placeholders so a reader
    /// of the draft can see what still needs filling in.
    pub fn build(
        document: &DocumentRecord,
        user: &UserRecord,
        profile: Option<&UserProfileRecord>,
    ) -> Self {
        let plaintiff_name = profile
            .map(|p| p.full_legal_name.trim().to_string())
            .filter(|name| !name.is_empty())
            .or_else(|| Some(user.full_name()).filter(|name| !name.is_empty()))
            .unwrap_or_else(|| user.username.clone());

        let plaintiff_state = profile
            .map(|p| p.state.trim())
            .filter(|state| !state.is_empty())
            .map(full_state_name)
            .unwrap_or_else(|| "[STATE]".to_string());

        let incident_date = document
            .incident_date
            .map(|date| date.format(DATE_DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| "[DATE OF INCIDENT]".to_string());

        Self {
            plaintiff_name,
            plaintiff_state,
            incident_date,
            incident_location: location_display(document),
            incident_city: or_placeholder(&document.incident_city, "[CITY]"),
            incident_state: or_placeholder(&document.incident_state, "[STATE]"),
            incident_street_address: document.incident_street_address.clone(),
            defendants: or_placeholder(&document.defendants, "[DEFENDANTS TO BE IDENTIFIED]"),
            description: or_placeholder(&document.description, "[DESCRIPTION]"),
        }
    }

    /// Flatten into the map consumed by the renderer
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// Key/value pairs in declaration order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("plaintiff_name", self.plaintiff_name.as_str()),
            ("plaintiff_state", self.plaintiff_state.as_str()),
            ("incident_date", self.incident_date.as_str()),
            ("incident_location", self.incident_location.as_str()),
            ("incident_city", self.incident_city.as_str()),
            ("incident_state", self.incident_state.as_str()),
            ("incident_street_address", self.incident_street_address.as_str()),
            ("defendants", self.defendants.as_str()),
            ("description", self.description.as_str()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// Location shown in pleadings.
///
/// Prefers the structured address (street, city, state), then city and
/// state, then the free-text location, then `[LOCATION]`.
pub fn location_display(document: &DocumentRecord) -> String {
    let city = document.incident_city.trim();
    let state = document.incident_state.trim();
    let street = document.incident_street_address.trim();

    if !city.is_empty() && !state.is_empty() {
        if street.is_empty() {
            format!("{}, {}", city, state)
        } else {
            format!("{}, {}, {}", street, city, state)
        }
    } else if !document.incident_location.trim().is_empty() {
        document.incident_location.clone()
    } else {
        "[LOCATION]".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn user() -> UserRecord {
        UserRecord {
            id: 1,
            username: "jdoe".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_withEmptyDocument_shouldUsePlaceholders() {
        let context = TemplateContext::build(&DocumentRecord::default(), &user(), None);

        assert_eq!(context.plaintiff_name, "Jane Doe");
        assert_eq!(context.plaintiff_state, "[STATE]");
        assert_eq!(context.incident_date, "[DATE OF INCIDENT]");
        assert_eq!(context.incident_location, "[LOCATION]");
        assert_eq!(context.incident_city, "[CITY]");
        assert_eq!(context.defendants, "[DEFENDANTS TO BE IDENTIFIED]");
        assert_eq!(context.description, "[DESCRIPTION]");
        assert_eq!(context.incident_street_address, "");
    }

    #[test]
    fn test_build_withProfile_shouldExpandStateAndUseLegalName() {
        let profile = UserProfileRecord {
            full_legal_name: "Jane Q. Doe".to_string(),
            state: "pa".to_string(),
            ..Default::default()
        };
        let document = DocumentRecord {
            incident_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            ..Default::default()
        };

        let context = TemplateContext::build(&document, &user(), Some(&profile));
        assert_eq!(context.plaintiff_name, "Jane Q. Doe");
        assert_eq!(context.plaintiff_state, "Pennsylvania");
        assert_eq!(context.incident_date, "March 05, 2024");
    }

    #[test]
    fn test_build_withBlankLegalName_shouldFallBackToUsername() {
        let profile = UserProfileRecord::default();
        let anonymous = UserRecord {
            username: "anon".to_string(),
            ..Default::default()
        };
        let context = TemplateContext::build(&DocumentRecord::default(), &anonymous, Some(&profile));
        assert_eq!(context.plaintiff_name, "anon");
    }

    #[test]
    fn test_locationDisplay_shouldFollowFallbackChain() {
        let mut document = DocumentRecord {
            incident_location: "Near the courthouse".to_string(),
            incident_city: "Erie".to_string(),
            ..Default::default()
        };
        assert_eq!(location_display(&document), "Near the courthouse");

        document.incident_state = "PA".to_string();
        assert_eq!(location_display(&document), "Erie, PA");

        document.incident_street_address = "140 W 6th St".to_string();
        assert_eq!(location_display(&document), "140 W 6th St, Erie, PA");
    }

    #[test]
    fn test_toMap_shouldContainEveryKey() {
        let context = TemplateContext::build(&DocumentRecord::default(), &user(), None);
        let map = context.to_map();
        assert_eq!(map.len(), 9);
        assert_eq!(context.get("incident_city"), Some("[CITY]"));
        assert_eq!(context.get("nope"), None);
    }
}

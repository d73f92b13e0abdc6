//! US state codes and names
//!
//! Used for plaintiff residency in generated pleadings and for selecting
//! the federal court table in `court`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// US state (plus DC) by postal abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UsState {
    AL,
    AK,
    AZ,
    AR,
    CA,
    CO,
    CT,
    DE,
    FL,
    GA,
    HI,
    ID,
    IL,
    IN,
    IA,
    KS,
    KY,
    LA,
    ME,
    MD,
    MA,
    MI,
    MN,
    MS,
    MO,
    MT,
    NE,
    NV,
    NH,
    NJ,
    NM,
    NY,
    NC,
    ND,
    OH,
    OK,
    OR,
    PA,
    RI,
    SC,
    SD,
    TN,
    TX,
    UT,
    VT,
    VA,
    WA,
    WV,
    WI,
    WY,
    DC,
}

impl UsState {
    /// Every state in abbreviation order
    pub const ALL: [UsState; 51] = [
        UsState::AL,
        UsState::AK,
        UsState::AZ,
        UsState::AR,
        UsState::CA,
        UsState::CO,
        UsState::CT,
        UsState::DE,
        UsState::FL,
        UsState::GA,
        UsState::HI,
        UsState::ID,
        UsState::IL,
        UsState::IN,
        UsState::IA,
        UsState::KS,
        UsState::KY,
        UsState::LA,
        UsState::ME,
        UsState::MD,
        UsState::MA,
        UsState::MI,
        UsState::MN,
        UsState::MS,
        UsState::MO,
        UsState::MT,
        UsState::NE,
        UsState::NV,
        UsState::NH,
        UsState::NJ,
        UsState::NM,
        UsState::NY,
        UsState::NC,
        UsState::ND,
        UsState::OH,
        UsState::OK,
        UsState::OR,
        UsState::PA,
        UsState::RI,
        UsState::SC,
        UsState::SD,
        UsState::TN,
        UsState::TX,
        UsState::UT,
        UsState::VT,
        UsState::VA,
        UsState::WA,
        UsState::WV,
        UsState::WI,
        UsState::WY,
        UsState::DC,
    ];

    /// Get the full state name
    pub fn name(&self) -> &'static str {
        match self {
            UsState::AL => "Alabama",
            UsState::AK => "Alaska",
            UsState::AZ => "Arizona",
            UsState::AR => "Arkansas",
            UsState::CA => "California",
            UsState::CO => "Colorado",
            UsState::CT => "Connecticut",
            UsState::DE => "Delaware",
            UsState::FL => "Florida",
            UsState::GA => "Georgia",
            UsState::HI => "Hawaii",
            UsState::ID => "Idaho",
            UsState::IL => "Illinois",
            UsState::IN => "Indiana",
            UsState::IA => "Iowa",
            UsState::KS => "Kansas",
            UsState::KY => "Kentucky",
            UsState::LA => "Louisiana",
            UsState::ME => "Maine",
            UsState::MD => "Maryland",
            UsState::MA => "Massachusetts",
            UsState::MI => "Michigan",
            UsState::MN => "Minnesota",
            UsState::MS => "Mississippi",
            UsState::MO => "Missouri",
            UsState::MT => "Montana",
            UsState::NE => "Nebraska",
            UsState::NV => "Nevada",
            UsState::NH => "New Hampshire",
            UsState::NJ => "New Jersey",
            UsState::NM => "New Mexico",
            UsState::NY => "New York",
            UsState::NC => "North Carolina",
            UsState::ND => "North Dakota",
            UsState::OH => "Ohio",
            UsState::OK => "Oklahoma",
            UsState::OR => "Oregon",
            UsState::PA => "Pennsylvania",
            UsState::RI => "Rhode Island",
            UsState::SC => "South Carolina",
            UsState::SD => "South Dakota",
            UsState::TN => "Tennessee",
            UsState::TX => "Texas",
            UsState::UT => "Utah",
            UsState::VT => "Vermont",
            UsState::VA => "Virginia",
            UsState::WA => "Washington",
            UsState::WV => "West Virginia",
            UsState::WI => "Wisconsin",
            UsState::WY => "Wyoming",
            UsState::DC => "District of Columbia",
        }
    }

    /// Postal abbreviation
    pub fn code(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for UsState {
    type Err = anyhow::Error;

    /// Parses a postal abbreviation or a full state name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = trimmed.to_uppercase();
        UsState::ALL
            .iter()
            .copied()
            .find(|state| state.code() == code || state.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| anyhow::anyhow!("Unknown state: {}", s))
    }
}

/// Expand a profile's state field to the full name used in pleadings.
///
/// Known abbreviations are expanded, anything else is passed through as typed.
pub fn full_state_name(value: &str) -> String {
    match value.parse::<UsState>() {
        Ok(state) => state.name().to_string(),
        Err(_) => value.to_string(),
    }
}

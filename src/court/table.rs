/*!
 * Static court tables and the lookup cascade that runs over them.
 */

use crate::jurisdiction::UsState;

/// Federal judicial district
#[derive(Debug, Clone, Copy)]
pub struct District {
    pub name: &'static str,
    /// First entry is where unplaced counties are filed
    pub divisions: &'static [&'static str],
    pub counties: &'static [&'static str],
    pub major_cities: &'static [&'static str],
}

/// Places that all belong to one (district, division)
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub district: &'static str,
    pub division: &'static str,
    pub places: &'static [&'static str],
}

/// Keywords that hint at a district when nothing matched exactly
#[derive(Debug, Clone, Copy)]
pub struct KeywordPattern {
    pub district: &'static str,
    pub division: &'static str,
    pub keywords: &'static [&'static str],
}

/// Everything known about the federal courts of one state
#[derive(Debug, Clone, Copy)]
pub struct StateCourtTable {
    pub state: UsState,
    pub districts: &'static [District],
    pub cities: &'static [Placement],
    pub counties: &'static [Placement],
    pub patterns: &'static [KeywordPattern],
    /// Falls back to the first division of the first district when unset
    pub default: Option<(&'static str, &'static str)>,
}

/// How a location was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchKind {
    City,
    County,
    Keyword,
    Default,
}

fn same(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Counties stored as "All X Counties" stand for the whole state
fn is_placeholder_county(county: &str) -> bool {
    county.starts_with("All ") && county.ends_with(" Counties")
}

fn find_placement(
    placements: &[Placement],
    name: &str,
) -> Option<(&'static str, &'static str)> {
    placements
        .iter()
        .find(|p| p.places.iter().any(|place| same(place, name)))
        .map(|p| (p.district, p.division))
}

impl StateCourtTable {
    pub fn name(&self) -> &'static str {
        self.state.name()
    }

    /// Exact city match, then a city that names a division
    pub(crate) fn match_city(&self, city: &str) -> Option<(&'static str, &'static str)> {
        find_placement(self.cities, city).or_else(|| {
            self.districts.iter().find_map(|d| {
                d.divisions
                    .iter()
                    .find(|division| same(division, city))
                    .map(|division| (d.name, *division))
            })
        })
    }

    /// County match, with or without a trailing " County"
    pub(crate) fn match_county(&self, county: &str) -> Option<(&'static str, &'static str)> {
        let trimmed = county.trim();
        let cut = trimmed.len().saturating_sub(" county".len());
        let base = match trimmed.get(cut..) {
            Some(suffix) if cut > 0 && suffix.eq_ignore_ascii_case(" county") => &trimmed[..cut],
            _ => trimmed,
        };

        [trimmed, base].into_iter().find_map(|name| {
            find_placement(self.counties, name).or_else(|| {
                self.districts.iter().find_map(|d| {
                    let listed = d
                        .counties
                        .iter()
                        .any(|c| !is_placeholder_county(c) && same(c, name));
                    match (listed, d.divisions.first()) {
                        (true, Some(division)) => Some((d.name, *division)),
                        _ => None,
                    }
                })
            })
        })
    }

    /// First pattern with a keyword inside the lowercased city
    pub(crate) fn match_keyword(&self, city: &str) -> Option<(&'static str, &'static str)> {
        let lowered = city.trim().to_lowercase();
        self.patterns
            .iter()
            .find(|p| p.keywords.iter().any(|k| lowered.contains(k)))
            .map(|p| (p.district, p.division))
    }

    pub(crate) fn default_court(&self) -> (&'static str, &'static str) {
        self.default.unwrap_or_else(|| {
            self.districts
                .first()
                .map(|d| (d.name, d.divisions.first().copied().unwrap_or("")))
                .unwrap_or(("", ""))
        })
    }

    /// Run the cascade: city, county, keyword, default
    pub(crate) fn place(
        &self,
        city: &str,
        county: Option<&str>,
    ) -> (&'static str, &'static str, MatchKind) {
        if let Some((district, division)) = self.match_city(city) {
            return (district, division, MatchKind::City);
        }
        if let Some((district, division)) = county
            .filter(|c| !c.trim().is_empty())
            .and_then(|c| self.match_county(c))
        {
            return (district, division, MatchKind::County);
        }
        if let Some((district, division)) = self.match_keyword(city) {
            return (district, division, MatchKind::Keyword);
        }
        let (district, division) = self.default_court();
        (district, division, MatchKind::Default)
    }
}

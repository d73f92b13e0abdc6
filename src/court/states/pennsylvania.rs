//! Federal courts of Pennsylvania

use crate::court::table::{District, KeywordPattern, Placement, StateCourtTable};
use crate::jurisdiction::UsState;

const EASTERN: &str = "Eastern District of Pennsylvania";
const MIDDLE: &str = "Middle District of Pennsylvania";
const WESTERN: &str = "Western District of Pennsylvania";

pub const PENNSYLVANIA: StateCourtTable = StateCourtTable {
    state: UsState::PA,
    districts: &[
        District {
            name: EASTERN,
            divisions: &["Philadelphia", "Reading", "Allentown"],
            counties: &["Berks", "Bucks", "Chester", "Delaware", "Lancaster", "Lehigh", "Montgomery", "Northampton", "Philadelphia", "Schuylkill"],
            major_cities: &["Philadelphia", "Reading", "Allentown", "Bethlehem", "Chester", "Norristown", "Lancaster", "Easton"],
        },
        District {
            name: MIDDLE,
            divisions: &["Scranton", "Wilkes-Barre", "Williamsport", "Harrisburg"],
            counties: &[
                "Adams", "Bradford", "Carbon", "Centre", "Clinton", "Columbia", "Cumberland", "Dauphin", "Franklin",
                "Fulton", "Huntingdon", "Juniata", "Lackawanna", "Lebanon", "Luzerne", "Lycoming", "Mifflin",
                "Monroe", "Montour", "Northumberland", "Perry", "Pike", "Snyder", "Sullivan", "Susquehanna", "Tioga",
                "Union", "Wayne", "Wyoming", "York",
            ],
            major_cities: &["Harrisburg", "Scranton", "Wilkes-Barre", "Williamsport", "York", "Lebanon", "State College", "Hazleton"],
        },
        District {
            name: WESTERN,
            divisions: &["Pittsburgh", "Erie", "Johnstown"],
            counties: &[
                "Allegheny", "Armstrong", "Beaver", "Bedford", "Blair", "Butler", "Cambria", "Cameron", "Clarion",
                "Clearfield", "Crawford", "Elk", "Erie", "Fayette", "Forest", "Greene", "Indiana", "Jefferson",
                "Lawrence", "McKean", "Mercer", "Potter", "Somerset", "Venango", "Warren", "Washington",
                "Westmoreland",
            ],
            major_cities: &["Pittsburgh", "Erie", "Johnstown", "Altoona", "Clarion", "Oil City", "Warren", "Bradford", "DuBois", "Indiana", "Greensburg"],
        },
    ],
    cities: &[
        Placement {
            district: EASTERN,
            division: "Philadelphia",
            places: &[
                "Philadelphia", "Chester", "Norristown", "Lancaster", "Upper Darby", "Levittown", "Bristol",
                "West Chester", "Coatesville", "Phoenixville", "King of Prussia", "Doylestown",
            ],
        },
        Placement {
            district: EASTERN,
            division: "Reading",
            places: &["Reading", "Pottstown"],
        },
        Placement {
            district: EASTERN,
            division: "Allentown",
            places: &["Allentown", "Bethlehem", "Easton"],
        },
        Placement {
            district: MIDDLE,
            division: "Harrisburg",
            places: &["Harrisburg", "York", "Lebanon", "Lewistown", "Carlisle", "Chambersburg", "Gettysburg", "Waynesboro"],
        },
        Placement {
            district: MIDDLE,
            division: "Scranton",
            places: &["Scranton", "Stroudsburg"],
        },
        Placement {
            district: MIDDLE,
            division: "Wilkes-Barre",
            places: &["Wilkes-Barre", "Hazleton", "Jim Thorpe", "Pottsville"],
        },
        Placement {
            district: MIDDLE,
            division: "Williamsport",
            places: &["Williamsport", "State College", "Bloomsburg", "Sunbury"],
        },
        Placement {
            district: WESTERN,
            division: "Pittsburgh",
            places: &[
                "Pittsburgh", "Clarion", "Oil City", "Warren", "Bradford", "DuBois", "Indiana", "Greensburg",
                "New Castle", "Butler", "Washington", "Uniontown", "Connellsville", "McKeesport", "Monessen",
                "Jeannette", "Latrobe", "Franklin", "Titusville", "Meadville", "Sharon", "Hermitage", "St Marys",
                "Ridgway", "Clearfield", "Punxsutawney", "Brookville",
            ],
        },
        Placement {
            district: WESTERN,
            division: "Erie",
            places: &["Erie"],
        },
        Placement {
            district: WESTERN,
            division: "Johnstown",
            places: &["Johnstown", "Altoona", "Somerset", "Bedford", "Huntingdon", "Bellefonte"],
        },
    ],
    counties: &[
        Placement {
            district: EASTERN,
            division: "Philadelphia",
            places: &["Bucks", "Chester", "Delaware", "Lancaster", "Montgomery", "Philadelphia"],
        },
        Placement {
            district: EASTERN,
            division: "Reading",
            places: &["Berks", "Schuylkill"],
        },
        Placement {
            district: EASTERN,
            division: "Allentown",
            places: &["Lehigh", "Northampton"],
        },
        Placement {
            district: MIDDLE,
            division: "Harrisburg",
            places: &[
                "Adams", "Cumberland", "Dauphin", "Franklin", "Fulton", "Huntingdon", "Juniata", "Lebanon", "Mifflin",
                "Perry", "York",
            ],
        },
        Placement {
            district: MIDDLE,
            division: "Williamsport",
            places: &[
                "Bradford", "Centre", "Clinton", "Columbia", "Lycoming", "Montour", "Northumberland", "Snyder",
                "Sullivan", "Tioga", "Union",
            ],
        },
        Placement {
            district: MIDDLE,
            division: "Wilkes-Barre",
            places: &["Carbon", "Luzerne", "Wyoming"],
        },
        Placement {
            district: MIDDLE,
            division: "Scranton",
            places: &["Lackawanna", "Monroe", "Pike", "Susquehanna", "Wayne"],
        },
        Placement {
            district: WESTERN,
            division: "Pittsburgh",
            places: &[
                "Allegheny", "Armstrong", "Beaver", "Butler", "Cameron", "Clarion", "Clearfield", "Crawford", "Elk",
                "Fayette", "Forest", "Greene", "Indiana", "Jefferson", "Lawrence", "McKean", "Mercer", "Potter",
                "Venango", "Warren", "Washington", "Westmoreland",
            ],
        },
        Placement {
            district: WESTERN,
            division: "Johnstown",
            places: &["Bedford", "Blair", "Cambria", "Somerset"],
        },
        Placement {
            district: WESTERN,
            division: "Erie",
            places: &["Erie"],
        },
    ],
    patterns: &[
        KeywordPattern {
            district: EASTERN,
            division: "Philadelphia",
            keywords: &["east", "philadelphia", "philly", "reading", "allentown", "lehigh", "delaware", "chester"],
        },
        KeywordPattern {
            district: MIDDLE,
            division: "Harrisburg",
            keywords: &["central", "middle", "harrisburg", "scranton", "wilkes", "capital", "anthracite"],
        },
        KeywordPattern {
            district: WESTERN,
            division: "Pittsburgh",
            keywords: &["west", "pittsburgh", "erie", "johnstown", "allegheny", "steel", "coal"],
        },
    ],
    default: Some((EASTERN, "Philadelphia")),
};

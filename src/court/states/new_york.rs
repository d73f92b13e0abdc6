//! Federal courts of New York

use crate::court::table::{District, KeywordPattern, Placement, StateCourtTable};
use crate::jurisdiction::UsState;

const SOUTHERN: &str = "Southern District of New York";
const EASTERN: &str = "Eastern District of New York";
const NORTHERN: &str = "Northern District of New York";
const WESTERN: &str = "Western District of New York";

pub const NEW_YORK: StateCourtTable = StateCourtTable {
    state: UsState::NY,
    districts: &[
        District {
            name: SOUTHERN,
            divisions: &["Manhattan", "White Plains"],
            counties: &["New York", "Bronx", "Westchester", "Rockland", "Putnam", "Orange", "Dutchess", "Sullivan"],
            major_cities: &["Manhattan", "New York", "Bronx", "Yonkers", "White Plains", "New Rochelle", "Mount Vernon", "Newburgh", "Poughkeepsie"],
        },
        District {
            name: EASTERN,
            divisions: &["Brooklyn", "Central Islip"],
            counties: &["Kings", "Queens", "Richmond", "Nassau", "Suffolk"],
            major_cities: &["Brooklyn", "Queens", "Staten Island", "Hempstead", "Huntington", "Babylon", "Islip"],
        },
        District {
            name: NORTHERN,
            divisions: &["Albany", "Syracuse", "Utica", "Binghamton", "Watertown"],
            counties: &[
                "Albany", "Broome", "Cayuga", "Chenango", "Clinton", "Columbia", "Cortland", "Delaware", "Essex",
                "Franklin", "Fulton", "Greene", "Hamilton", "Herkimer", "Jefferson", "Lewis", "Madison",
                "Montgomery", "Oneida", "Onondaga", "Oswego", "Otsego", "Rensselaer", "St. Lawrence", "Saratoga",
                "Schenectady", "Schoharie", "Tioga", "Tompkins", "Warren", "Washington",
            ],
            major_cities: &["Albany", "Syracuse", "Utica", "Binghamton", "Watertown", "Ithaca", "Cortland", "Auburn", "Rome", "Plattsburgh", "Troy", "Schenectady"],
        },
        District {
            name: WESTERN,
            divisions: &["Buffalo", "Rochester"],
            counties: &[
                "Allegany", "Cattaraugus", "Chautauqua", "Chemung", "Erie", "Genesee", "Livingston", "Monroe",
                "Niagara", "Ontario", "Orleans", "Schuyler", "Seneca", "Steuben", "Wayne", "Wyoming", "Yates",
            ],
            major_cities: &["Buffalo", "Rochester", "Elmira", "Olean", "Jamestown", "Batavia", "Geneseo", "Hornell", "Lockport", "Niagara Falls", "Alfred"],
        },
    ],
    cities: &[
        Placement {
            district: WESTERN,
            division: "Buffalo",
            places: &[
                "Alfred", "Buffalo", "Olean", "Jamestown", "Lockport", "Niagara Falls", "Wellsville", "Cuba",
                "Salamanca", "Dunkirk", "Fredonia", "North Tonawanda",
            ],
        },
        Placement {
            district: WESTERN,
            division: "Rochester",
            places: &[
                "Rochester", "Elmira", "Batavia", "Geneseo", "Hornell", "Bath", "Corning", "Canandaigua", "Geneva",
                "Penn Yan", "Watkins Glen",
            ],
        },
        Placement {
            district: NORTHERN,
            division: "Albany",
            places: &["Albany", "Troy", "Schenectady", "Glens Falls", "Saratoga Springs", "Amsterdam", "Johnstown"],
        },
        Placement {
            district: NORTHERN,
            division: "Syracuse",
            places: &["Syracuse", "Cortland", "Auburn", "Oswego", "Fulton"],
        },
        Placement {
            district: NORTHERN,
            division: "Utica",
            places: &["Utica", "Rome"],
        },
        Placement {
            district: NORTHERN,
            division: "Binghamton",
            places: &["Binghamton", "Ithaca", "Oneonta"],
        },
        Placement {
            district: NORTHERN,
            division: "Watertown",
            places: &["Watertown", "Plattsburgh", "Massena", "Potsdam", "Canton"],
        },
        Placement {
            district: EASTERN,
            division: "Brooklyn",
            places: &["Brooklyn", "Queens", "Staten Island"],
        },
        Placement {
            district: EASTERN,
            division: "Central Islip",
            places: &[
                "Central Islip", "Hempstead", "Huntington", "Babylon", "Islip", "Riverhead", "Patchogue",
                "Bay Shore", "Brentwood", "Levittown", "Freeport", "Long Beach", "Glen Cove",
            ],
        },
        Placement {
            district: SOUTHERN,
            division: "Manhattan",
            places: &["Manhattan", "New York", "Bronx"],
        },
        Placement {
            district: SOUTHERN,
            division: "White Plains",
            places: &[
                "White Plains", "Yonkers", "New Rochelle", "Mount Vernon", "Newburgh", "Poughkeepsie", "Scarsdale",
                "Mamaroneck", "Rye", "Tarrytown", "Peekskill", "Middletown", "Kingston", "Spring Valley", "Nyack",
            ],
        },
    ],
    counties: &[
        Placement {
            district: WESTERN,
            division: "Buffalo",
            places: &["Allegany", "Cattaraugus", "Chautauqua", "Erie", "Niagara", "Wyoming"],
        },
        Placement {
            district: WESTERN,
            division: "Rochester",
            places: &[
                "Chemung", "Genesee", "Livingston", "Monroe", "Ontario", "Orleans", "Schuyler", "Seneca", "Steuben",
                "Wayne", "Yates",
            ],
        },
        Placement {
            district: NORTHERN,
            division: "Albany",
            places: &["Albany", "Columbia", "Greene", "Rensselaer", "Saratoga", "Schenectady", "Warren", "Washington"],
        },
        Placement {
            district: NORTHERN,
            division: "Binghamton",
            places: &["Broome", "Chenango", "Delaware", "Otsego", "Schoharie", "Tioga", "Tompkins"],
        },
        Placement {
            district: NORTHERN,
            division: "Syracuse",
            places: &["Cayuga", "Cortland", "Madison", "Onondaga", "Oswego"],
        },
        Placement {
            district: NORTHERN,
            division: "Watertown",
            places: &["Clinton", "Essex", "Franklin", "Jefferson", "St. Lawrence"],
        },
        Placement {
            district: NORTHERN,
            division: "Utica",
            places: &["Fulton", "Hamilton", "Herkimer", "Lewis", "Montgomery", "Oneida"],
        },
        Placement {
            district: EASTERN,
            division: "Brooklyn",
            places: &["Kings", "Queens", "Richmond"],
        },
        Placement {
            district: EASTERN,
            division: "Central Islip",
            places: &["Nassau", "Suffolk"],
        },
        Placement {
            district: SOUTHERN,
            division: "Manhattan",
            places: &["New York", "Bronx"],
        },
        Placement {
            district: SOUTHERN,
            division: "White Plains",
            places: &["Westchester", "Rockland", "Putnam", "Orange", "Dutchess", "Sullivan"],
        },
    ],
    patterns: &[
        KeywordPattern {
            district: WESTERN,
            division: "Buffalo",
            keywords: &["west", "buffalo", "rochester", "finger", "lake", "allegany", "cattaraugus"],
        },
        KeywordPattern {
            district: NORTHERN,
            division: "Albany",
            keywords: &["north", "albany", "syracuse", "utica", "adirondack", "capital", "central"],
        },
        KeywordPattern {
            district: EASTERN,
            division: "Brooklyn",
            keywords: &["long", "island", "brooklyn", "queens", "suffolk", "nassau", "islip"],
        },
        KeywordPattern {
            district: SOUTHERN,
            division: "Manhattan",
            keywords: &["manhattan", "bronx", "westchester", "nyc", "new york city", "metro"],
        },
    ],
    default: Some((SOUTHERN, "Manhattan")),
};

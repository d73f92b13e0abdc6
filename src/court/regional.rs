/*!
 * District tables for the Midwest and the smaller Northeastern states.
 *
 * These carry districts, divisions and county lists only. Counties resolve to
 * the first division of their district and anything else falls through to the
 * state's first district.
 */

use crate::court::table::{District, StateCourtTable};
use crate::jurisdiction::UsState;

const fn simple(state: UsState, districts: &'static [District]) -> StateCourtTable {
    StateCourtTable {
        state,
        districts,
        cities: &[],
        counties: &[],
        patterns: &[],
        default: None,
    }
}

const fn district(
    name: &'static str,
    divisions: &'static [&'static str],
    counties: &'static [&'static str],
) -> District {
    District {
        name,
        divisions,
        counties,
        major_cities: &[],
    }
}

// ===== Midwest =====

pub const ILLINOIS: StateCourtTable = simple(
    UsState::IL,
    &[
        district(
            "Northern District of Illinois",
            &["Chicago", "Rockford"],
            &[
                "Cook", "DuPage", "Grundy", "Kane", "Kendall", "Lake", "LaSalle", "McHenry", "Will", "Boone",
                "Carroll", "DeKalb", "Jo Daviess", "Lee", "Ogle", "Stephenson", "Whiteside", "Winnebago",
            ],
        ),
        district(
            "Central District of Illinois",
            &["Springfield", "Peoria", "Rock Island", "Urbana"],
            &[
                "Adams", "Brown", "Bureau", "Cass", "Champaign", "Christian", "Coles", "Cumberland", "DeWitt",
                "Douglas", "Edgar", "Ford", "Fulton", "Greene", "Hancock", "Henderson", "Henry", "Iroquois",
                "Kankakee", "Knox", "Livingston", "Logan", "McDonough", "McLean", "Macon", "Marshall", "Mason",
                "Menard", "Mercer", "Morgan", "Moultrie", "Peoria", "Piatt", "Pike", "Putnam", "Rock Island",
                "Sangamon", "Schuyler", "Scott", "Shelby", "Stark", "Tazewell", "Vermilion", "Warren", "Woodford",
            ],
        ),
        district(
            "Southern District of Illinois",
            &["East St. Louis", "Benton"],
            &[
                "Alexander", "Bond", "Calhoun", "Clark", "Clay", "Clinton", "Crawford", "Edwards", "Effingham",
                "Fayette", "Franklin", "Gallatin", "Hamilton", "Hardin", "Jackson", "Jasper", "Jefferson", "Jersey",
                "Johnson", "Lawrence", "Macoupin", "Madison", "Marion", "Massac", "Monroe", "Montgomery", "Perry",
                "Pope", "Pulaski", "Randolph", "Richland", "Saline", "St. Clair", "Union", "Wabash", "Washington",
                "Wayne", "White", "Williamson",
            ],
        ),
    ],
);

pub const OHIO: StateCourtTable = simple(
    UsState::OH,
    &[
        district(
            "Northern District of Ohio",
            &["Cleveland", "Akron", "Toledo", "Youngstown"],
            &[
                "Allen", "Ashland", "Ashtabula", "Crawford", "Cuyahoga", "Defiance", "Erie", "Fulton", "Geauga",
                "Hancock", "Hardin", "Henry", "Huron", "Lake", "Lorain", "Lucas", "Mahoning", "Marion", "Medina",
                "Mercer", "Ottawa", "Paulding", "Portage", "Putnam", "Richland", "Sandusky", "Seneca", "Stark",
                "Summit", "Trumbull", "Van Wert", "Wayne", "Williams", "Wood", "Wyandot",
            ],
        ),
        district(
            "Southern District of Ohio",
            &["Columbus", "Cincinnati", "Dayton"],
            &[
                "Adams", "Athens", "Auglaize", "Belmont", "Brown", "Butler", "Carroll", "Champaign", "Clark",
                "Clermont", "Clinton", "Columbiana", "Coshocton", "Darke", "Delaware", "Fairfield", "Fayette",
                "Franklin", "Gallia", "Greene", "Guernsey", "Hamilton", "Harrison", "Highland", "Hocking", "Holmes",
                "Jackson", "Jefferson", "Knox", "Lawrence", "Licking", "Logan", "Madison", "Meigs", "Miami",
                "Monroe", "Montgomery", "Morgan", "Morrow", "Muskingum", "Noble", "Pickaway", "Pike", "Preble",
                "Ross", "Scioto", "Shelby", "Tuscarawas", "Union", "Vinton", "Warren", "Washington",
            ],
        ),
    ],
);

pub const MICHIGAN: StateCourtTable = simple(
    UsState::MI,
    &[
        district(
            "Eastern District of Michigan",
            &["Detroit", "Ann Arbor", "Bay City", "Flint", "Port Huron"],
            &[
                "Genesee", "Lapeer", "Livingston", "Macomb", "Monroe", "Oakland", "St. Clair", "Sanilac",
                "Shiawassee", "Tuscola", "Washtenaw", "Wayne", "Lenawee", "Hillsdale", "Jackson", "Ingham", "Eaton",
                "Barry", "Calhoun", "Kalamazoo", "Van Buren", "Berrien", "Cass", "St. Joseph", "Branch", "Huron",
                "Saginaw", "Bay", "Midland", "Gratiot", "Clinton", "Ionia", "Kent", "Ottawa", "Allegan", "Montcalm",
                "Mecosta", "Isabella", "Clare", "Gladwin", "Arenac",
            ],
        ),
        district(
            "Western District of Michigan",
            &["Grand Rapids", "Kalamazoo", "Marquette"],
            &[
                "Alcona", "Alger", "Alpena", "Antrim", "Baraga", "Benzie", "Charlevoix", "Cheboygan", "Chippewa",
                "Crawford", "Delta", "Dickinson", "Emmet", "Gogebic", "Grand Traverse", "Houghton", "Iosco", "Iron",
                "Kalkaska", "Keweenaw", "Lake", "Leelanau", "Luce", "Mackinac", "Manistee", "Marquette", "Mason",
                "Menominee", "Missaukee", "Newaygo", "Oceana", "Ontonagon", "Osceola", "Oscoda", "Otsego",
                "Presque Isle", "Roscommon", "Schoolcraft", "Wexford",
            ],
        ),
    ],
);

pub const INDIANA: StateCourtTable = simple(
    UsState::IN,
    &[
        district(
            "Northern District of Indiana",
            &["Fort Wayne", "South Bend", "Hammond"],
            &[
                "Adams", "Allen", "Benton", "Blackford", "Carroll", "Cass", "DeKalb", "Elkhart", "Fulton", "Grant",
                "Huntington", "Jasper", "Jay", "Kosciusko", "LaGrange", "Lake", "LaPorte", "Marshall", "Miami",
                "Newton", "Noble", "Porter", "Pulaski", "St. Joseph", "Starke", "Steuben", "Wabash", "Wells",
                "White", "Whitley",
            ],
        ),
        district(
            "Southern District of Indiana",
            &["Indianapolis", "Terre Haute", "Evansville", "New Albany"],
            &[
                "Bartholomew", "Boone", "Brown", "Clark", "Clay", "Clinton", "Crawford", "Daviess", "Dearborn",
                "Decatur", "Delaware", "Dubois", "Fayette", "Floyd", "Fountain", "Franklin", "Gibson", "Greene",
                "Hamilton", "Hancock", "Harrison", "Hendricks", "Henry", "Howard", "Jackson", "Jefferson",
                "Jennings", "Johnson", "Knox", "Lawrence", "Madison", "Marion", "Martin", "Monroe", "Montgomery",
                "Morgan", "Ohio", "Orange", "Owen", "Parke", "Perry", "Pike", "Posey", "Putnam", "Randolph",
                "Ripley", "Rush", "Scott", "Shelby", "Spencer", "Sullivan", "Switzerland", "Tippecanoe", "Tipton",
                "Union", "Vanderburgh", "Vermillion", "Vigo", "Warren", "Warrick", "Washington", "Wayne",
            ],
        ),
    ],
);

pub const WISCONSIN: StateCourtTable = simple(
    UsState::WI,
    &[
        district(
            "Eastern District of Wisconsin",
            &["Milwaukee", "Green Bay"],
            &[
                "Brown", "Calumet", "Dodge", "Door", "Fond du Lac", "Forest", "Green Lake", "Kenosha", "Kewaunee",
                "Langlade", "Manitowoc", "Marinette", "Marquette", "Menominee", "Milwaukee", "Oconto",
                "Outagamie", "Ozaukee", "Racine", "Shawano", "Sheboygan", "Walworth", "Washington", "Waukesha",
                "Waupaca", "Waushara", "Winnebago",
            ],
        ),
        district(
            "Western District of Wisconsin",
            &["Madison"],
            &[
                "Adams", "Ashland", "Barron", "Bayfield", "Buffalo", "Burnett", "Chippewa", "Clark", "Columbia",
                "Crawford", "Dane", "Douglas", "Dunn", "Eau Claire", "Florence", "Grant", "Green", "Iowa", "Iron",
                "Jackson", "Jefferson", "Juneau", "La Crosse", "Lafayette", "Lincoln", "Marathon", "Monroe",
                "Oneida", "Pepin", "Pierce", "Polk", "Portage", "Price", "Richland", "Rock", "Rusk", "Sauk",
                "Sawyer", "St. Croix", "Taylor", "Trempealeau", "Vernon", "Vilas", "Washburn", "Wood",
            ],
        ),
    ],
);

pub const IOWA: StateCourtTable = simple(
    UsState::IA,
    &[
        district(
            "Northern District of Iowa",
            &["Cedar Rapids", "Sioux City"],
            &[
                "Allamakee", "Black Hawk", "Bremer", "Buchanan", "Butler", "Cerro Gordo", "Chickasaw", "Clayton",
                "Delaware", "Dubuque", "Fayette", "Floyd", "Franklin", "Grundy", "Hamilton", "Hancock", "Hardin",
                "Howard", "Humboldt", "Jackson", "Jones", "Linn", "Marshall", "Mitchell", "O'Brien", "Pocahontas",
                "Tama", "Webster", "Winnebago", "Winneshiek", "Worth", "Wright",
            ],
        ),
        district(
            "Southern District of Iowa",
            &["Des Moines", "Davenport"],
            &[
                "Adair", "Adams", "Appanoose", "Audubon", "Benton", "Boone", "Calhoun", "Carroll", "Cass", "Cedar",
                "Clarke", "Clinton", "Crawford", "Dallas", "Davis", "Decatur", "Des Moines", "Fremont", "Greene",
                "Guthrie", "Harrison", "Henry", "Iowa", "Jasper", "Jefferson", "Johnson", "Keokuk", "Lee", "Louisa",
                "Lucas", "Madison", "Mahaska", "Marion", "Mills", "Monroe", "Montgomery", "Muscatine", "Page",
                "Polk", "Pottawattamie", "Poweshiek", "Ringgold", "Scott", "Shelby", "Story", "Taylor", "Union",
                "Van Buren", "Wapello", "Warren", "Washington", "Wayne",
            ],
        ),
    ],
);

pub const MINNESOTA: StateCourtTable = simple(
    UsState::MN,
    &[district(
        "District of Minnesota",
        &["Minneapolis", "St. Paul", "Duluth", "Fergus Falls"],
        &["All Minnesota Counties"],
    )],
);

pub const MISSOURI: StateCourtTable = simple(
    UsState::MO,
    &[
        district(
            "Eastern District of Missouri",
            &["St. Louis", "Cape Girardeau", "Hannibal"],
            &[
                "Adair", "Audrain", "Bollinger", "Boone", "Butler", "Callaway", "Cape Girardeau", "Carter",
                "Chariton", "Clark", "Cole", "Crawford", "Dent", "Dunklin", "Franklin", "Gasconade", "Howard",
                "Iron", "Jefferson", "Knox", "Lewis", "Lincoln", "Linn", "Macon", "Madison", "Maries", "Marion",
                "Miller", "Mississippi", "Monroe", "Montgomery", "New Madrid", "Osage", "Pemiscot", "Perry",
                "Phelps", "Pike", "Pulaski", "Ralls", "Randolph", "Reynolds", "Ripley", "Scott", "Shannon",
                "Shelby", "St. Charles", "St. Francois", "St. Louis", "Ste. Genevieve", "Stoddard", "Warren",
                "Washington", "Wayne",
            ],
        ),
        district(
            "Western District of Missouri",
            &["Kansas City", "St. Joseph", "Jefferson City", "Springfield", "Joplin"],
            &[
                "Andrew", "Atchison", "Barry", "Barton", "Bates", "Benton", "Buchanan", "Caldwell", "Camden",
                "Cass", "Cedar", "Christian", "Clay", "Clinton", "Cooper", "Dade", "Dallas", "Daviess", "DeKalb",
                "Douglas", "Gentry", "Greene", "Grundy", "Harrison", "Henry", "Hickory", "Holt", "Howell",
                "Jackson", "Jasper", "Johnson", "Lafayette", "Lawrence", "Livingston", "McDonald", "Mercer",
                "Moniteau", "Morgan", "Newton", "Nodaway", "Oregon", "Ozark", "Pettis", "Platte", "Polk", "Putnam",
                "Ray", "Saline", "Stone", "Sullivan", "Taney", "Texas", "Vernon", "Webster", "Worth", "Wright",
            ],
        ),
    ],
);

pub const NORTH_DAKOTA: StateCourtTable = simple(
    UsState::ND,
    &[district(
        "District of North Dakota",
        &["Bismarck", "Fargo", "Grand Forks", "Minot"],
        &["All North Dakota Counties"],
    )],
);

pub const SOUTH_DAKOTA: StateCourtTable = simple(
    UsState::SD,
    &[district(
        "District of South Dakota",
        &["Sioux Falls", "Rapid City", "Aberdeen", "Pierre"],
        &["All South Dakota Counties"],
    )],
);

pub const NEBRASKA: StateCourtTable = simple(
    UsState::NE,
    &[district(
        "District of Nebraska",
        &["Omaha", "Lincoln", "North Platte"],
        &["All Nebraska Counties"],
    )],
);

pub const KANSAS: StateCourtTable = simple(
    UsState::KS,
    &[district(
        "District of Kansas",
        &["Kansas City", "Topeka", "Wichita"],
        &["All Kansas Counties"],
    )],
);

// ===== Northeast =====

pub const NEW_JERSEY: StateCourtTable = simple(
    UsState::NJ,
    &[district(
        "District of New Jersey",
        &["Newark", "Trenton", "Camden"],
        &["All New Jersey Counties"],
    )],
);

pub const CONNECTICUT: StateCourtTable = simple(
    UsState::CT,
    &[district(
        "District of Connecticut",
        &["Hartford", "New Haven", "Bridgeport"],
        &["All Connecticut Counties"],
    )],
);

pub const MASSACHUSETTS: StateCourtTable = simple(
    UsState::MA,
    &[district(
        "District of Massachusetts",
        &["Boston", "Worcester", "Springfield"],
        &["All Massachusetts Counties"],
    )],
);

pub const MIDWEST: &[StateCourtTable] = &[
    ILLINOIS, OHIO, MICHIGAN, INDIANA, WISCONSIN, IOWA, MINNESOTA, MISSOURI, NORTH_DAKOTA, SOUTH_DAKOTA, NEBRASKA,
    KANSAS,
];

pub const NORTHEAST: &[StateCourtTable] = &[NEW_JERSEY, CONNECTICUT, MASSACHUSETTS];

//! States with full city, county and keyword tables

pub mod new_york;
pub mod pennsylvania;

pub use new_york::NEW_YORK;
pub use pennsylvania::PENNSYLVANIA;

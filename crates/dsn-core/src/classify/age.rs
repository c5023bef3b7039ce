use crate::model::AgeBracket;
use chrono::{Datelike, NaiveDate};

/// Coarse bands used by the equality index: `(exclusive upper age, bracket)`.
pub const INDEX_BANDS: [(u32, AgeBracket); 4] = [
    (30, AgeBracket::Under30),
    (40, AgeBracket::From30To39),
    (50, AgeBracket::From40To49),
    (u32::MAX, AgeBracket::From50),
];

/// Five-year bands used by the age pyramid: `(exclusive upper age, label)`.
pub const PYRAMID_BANDS: [(u32, &str); 11] = [
    (20, "<20"),
    (25, "20-24"),
    (30, "25-29"),
    (35, "30-34"),
    (40, "35-39"),
    (45, "40-44"),
    (50, "45-49"),
    (55, "50-54"),
    (60, "55-59"),
    (65, "60-64"),
    (u32::MAX, "65+"),
];

/// Age in whole years on `reference`.
///
/// Returns None when the birth date falls after the reference date.
pub fn age_at(birth: NaiveDate, reference: NaiveDate) -> Option<u32> {
    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

fn lookup<T: Copy>(table: &[(u32, T)], age: u32) -> Option<T> {
    table
        .iter()
        .find(|(upper, _)| age < *upper)
        .map(|(_, band)| *band)
}

pub fn index_bracket(birth: NaiveDate, reference: NaiveDate) -> Option<AgeBracket> {
    lookup(&INDEX_BANDS, age_at(birth, reference)?)
}

pub fn pyramid_band(birth: NaiveDate, reference: NaiveDate) -> Option<&'static str> {
    lookup(&PYRAMID_BANDS, age_at(birth, reference)?)
}

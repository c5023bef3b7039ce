use crate::model::SocioCategory;

/// Conventional status code (`S21.G00.40.002`) -> socio-professional category.
pub const STATUS_CATEGORIES: [(&str, SocioCategory); 6] = [
    ("03", SocioCategory::Executive),
    ("04", SocioCategory::Executive),
    ("08", SocioCategory::Executive),
    ("05", SocioCategory::Supervisor),
    ("06", SocioCategory::Clerical),
    ("07", SocioCategory::Worker),
];

/// Ordinal hierarchy used to detect promotions, lowest first.
pub const HIERARCHY: [(SocioCategory, u8); 5] = [
    (SocioCategory::Worker, 1),
    (SocioCategory::Clerical, 2),
    (SocioCategory::Supervisor, 3),
    (SocioCategory::Executive, 4),
    (SocioCategory::SeniorExecutive, 5),
];

/// Map a status code to its category. Unmapped codes (including empty) give None.
pub fn category_for_status(code: &str) -> Option<SocioCategory> {
    let code = code.trim().trim_matches('\'');
    STATUS_CATEGORIES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, category)| *category)
}

pub fn rank(category: SocioCategory) -> u8 {
    HIERARCHY
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, r)| *r)
        .unwrap_or(0)
}

/// True when `to` sits strictly higher than `from` in the hierarchy.
pub fn is_promotion(from: SocioCategory, to: SocioCategory) -> bool {
    rank(to) > rank(from)
}

/// Remuneration type code (`S21.G00.51.011`) -> label.
pub const REMUNERATION_TYPES: [(&str, &str); 21] = [
    ("001", "Rémunération brute non plafonnée"),
    ("002", "Salaire brut (calcul Assurance chômage)"),
    ("003", "Salaire rétabli - reconstitué"),
    ("010", "Salaire de base"),
    ("011", "Avantage en nature - Nourriture"),
    ("012", "Heures d'équivalence"),
    ("013", "Heures supplémentaires"),
    ("014", "Heures complémentaires"),
    ("015", "Complément différentiel de salaire"),
    ("016", "Indemnité forfaitaire pour travaux supplémentaires"),
    ("017", "Heures de nuit"),
    ("018", "Heures de dimanche"),
    ("019", "Heures de jours fériés"),
    ("020", "Prime d'ancienneté"),
    ("021", "[FP] Taux de rémunération situation administrative"),
    ("022", "Potentiel nouveau type"),
    ("023", "Prime de froid"),
    ("024", "Prime d'habillage / déshabillage"),
    ("025", "Prime de salissure"),
    ("026", "Prime de panier"),
    ("027", "Autre type de rémunération"),
];

pub fn known_label(code: &str) -> Option<&'static str> {
    REMUNERATION_TYPES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
}

/// Label for a type code; unknown codes get a synthesized `Type {code}` label.
pub fn remuneration_label(code: &str) -> String {
    known_label(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Type {code}"))
}

// ---------------------------------------------------------------------------
// Classification code → human-readable category
// ---------------------------------------------------------------------------

/// Category assigned to rows whose classification code is missing or unknown.
pub const OTHER: &str = "Other";

/// Static mapping from the raw `CLASS` code to the category shown to users.
///
/// Lookup is an exact, case-sensitive match on the raw code.
pub const CLASSIFICATION_MAP: &[(&str, &str)] = &[
    ("ALLERGY", "Allergy"),
    ("BLDBK", "Blood Bank"),
    ("CELLMARK", "Cell Markers"),
    ("CHAL", "Challenge Tests"),
    ("CHAL.ROUTINE", "Routine Challenge Tests"),
    ("CHEM", "Chemistry"),
    ("COAG", "Coagulation"),
    ("DRUG/TOX", "Toxicology"),
    ("FERT", "Fertility"),
    ("HEM/BC", "CBC & Hematology"),
    ("MICRO", "Microbiology"),
    ("MOLPATH", "Molecular Pathology"),
    ("MOLPATH.PHARMG", "Pharmacogenomics"),
    ("PANEL.CHEM", "Chemistry Panels"),
    ("PANEL.HEM/BC", "CBC Panels"),
    ("PANEL.MICRO", "Microbiology Panels"),
    ("PANEL.SERO", "Serology Panels"),
    ("PANEL.UA", "Urinalysis Panels"),
    ("PATH", "Pathology"),
    ("SERO", "Serology"),
    ("UA", "Urinalysis"),
    ("LABORDERS", "Lab Orders"),
    ("MISC", "Miscellaneous"),
];

/// Resolve a classification code to its category, falling back to [`OTHER`].
pub fn category_for(class_code: Option<&str>) -> &'static str {
    class_code
        .and_then(|code| {
            CLASSIFICATION_MAP
                .iter()
                .find(|(key, _)| *key == code)
                .map(|(_, name)| *name)
        })
        .unwrap_or(OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert_eq!(category_for(Some("CHEM")), "Chemistry");
        assert_eq!(category_for(Some("HEM/BC")), "CBC & Hematology");
        assert_eq!(category_for(Some("PANEL.HEM/BC")), "CBC Panels");
        assert_eq!(category_for(Some("MOLPATH.PHARMG")), "Pharmacogenomics");
    }

    #[test]
    fn missing_and_unknown_codes_fall_back_to_other() {
        assert_eq!(category_for(None), OTHER);
        assert_eq!(category_for(Some("")), OTHER);
        assert_eq!(category_for(Some("RAD")), OTHER);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(category_for(Some("chem")), OTHER);
        assert_eq!(category_for(Some("Chem")), OTHER);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = CLASSIFICATION_MAP.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CLASSIFICATION_MAP.len());
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical regex"));

/// Strips parenthetical qualifiers (synonyms, common names) and surrounding whitespace.
pub fn normalize_species_name(raw_name: &str) -> String {
    PARENTHETICAL_REGEX
        .replace_all(raw_name, "")
        .trim()
        .to_string()
}

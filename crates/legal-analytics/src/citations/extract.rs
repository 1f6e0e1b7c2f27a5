use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_CASES: usize = 5;
const MAX_STATUTES: usize = 3;

static CASE_NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
static STATUTE_REFERENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn case_name_pattern() -> &'static Regex {
    CASE_NAME_PATTERN.get_or_init(|| {
        Regex::new(r"([A-Z][a-z]+ v\.? [A-Z][a-z]+|[A-Z][a-z]+ et al\.?)")
            .expect("case name pattern compiles")
    })
}

fn statute_reference_pattern() -> &'static Regex {
    STATUTE_REFERENCE_PATTERN.get_or_init(|| {
        Regex::new(r"(\d+ U\.S\.C\.? §? \d+|\d+ C\.F\.R\.? §? \d+)")
            .expect("statute reference pattern compiles")
    })
}

/// Authorities mentioned in free text, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAuthorities {
    pub cases: Vec<String>,
    pub statutes: Vec<String>,
}

impl ExtractedAuthorities {
    /// Cases first, then statutes.
    pub fn all(&self) -> Vec<String> {
        self.cases.iter().chain(&self.statutes).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() && self.statutes.is_empty()
    }
}

pub fn extract_authorities(text: &str) -> ExtractedAuthorities {
    let cases = case_name_pattern()
        .find_iter(text)
        .take(MAX_CASES)
        .map(|found| found.as_str().to_string())
        .collect();
    let statutes = statute_reference_pattern()
        .find_iter(text)
        .take(MAX_STATUTES)
        .map(|found| found.as_str().to_string())
        .collect();

    ExtractedAuthorities { cases, statutes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cases_and_statutes_in_order() {
        let text = "Under Monell v. Department and Smith et al. the claim arises under \
                    42 U.S.C. § 1983 and 29 C.F.R. § 1910 as applied.";
        let found = extract_authorities(text);

        assert_eq!(found.cases, vec!["Monell v. Department", "Smith et al."]);
        assert_eq!(found.statutes, vec!["42 U.S.C. § 1983", "29 C.F.R. § 1910"]);
        assert_eq!(
            found.all(),
            vec![
                "Monell v. Department",
                "Smith et al.",
                "42 U.S.C. § 1983",
                "29 C.F.R. § 1910"
            ]
        );
    }

    #[test]
    fn caps_number_of_results() {
        let text = "Able v. Baker, Cole v. Dunn, Egan v. Frost, Gale v. Hart, Ives v. Jones, \
                    Kent v. Lowe. 1 U.S.C. § 1, 2 U.S.C. § 2, 3 U.S.C. § 3, 4 U.S.C. § 4";
        let found = extract_authorities(text);

        assert_eq!(found.cases.len(), 5);
        assert_eq!(found.statutes.len(), 3);
    }

    #[test]
    fn plain_text_has_no_authorities() {
        assert!(extract_authorities("the tenant paid rent late twice").is_empty());
    }
}

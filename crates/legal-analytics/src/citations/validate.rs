use tracing::debug;

use super::domain::{CitationKind, CitationValidation};

/// Token checks per citation kind. Problems are reported, never raised.
pub fn validate_citation(text: &str, kind: CitationKind) -> CitationValidation {
    let mut validation = CitationValidation {
        is_valid: true,
        ..CitationValidation::default()
    };

    if text.trim().is_empty() {
        validation.is_valid = false;
        validation.errors.push("Citation text is empty".to_string());
        validation
            .suggestions
            .push("Provide the full citation text".to_string());
        return validation;
    }

    match kind {
        CitationKind::Case if !text.contains("v.") => {
            validation.is_valid = false;
            validation
                .errors
                .push("Case citation must include \"v.\" between party names".to_string());
            validation
                .suggestions
                .push("Use the format: Party v. Party, Volume Reporter Page (Court Year)".to_string());
        }
        CitationKind::Statute if !(text.contains('§') || text.contains("sec.")) => {
            validation.is_valid = false;
            validation
                .errors
                .push("Statute citation must include a section symbol (§)".to_string());
            validation
                .suggestions
                .push("Use the format: Title Code § Section (Year)".to_string());
        }
        CitationKind::Constitution if !text.contains("Const.") => {
            validation.is_valid = false;
            validation
                .errors
                .push("Constitutional citation must include \"Const.\"".to_string());
            validation
                .suggestions
                .push("Use the format: U.S. Const. art. I, § 8".to_string());
        }
        _ => {}
    }

    debug!(%kind, is_valid = validation.is_valid, "validated citation text");
    validation
}

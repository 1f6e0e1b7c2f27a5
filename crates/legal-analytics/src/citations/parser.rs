//! Regex recovery of citation components and short forms.
//!
//! Only case and statute citations have a structural pattern. Anything that
//! does not match comes back as `{"text": original}` rather than an error.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::domain::{CitationKind, ParsedCitation};

const CASE_FIELDS: [&str; 6] = ["case_name", "volume", "reporter", "page", "court", "year"];
const STATUTE_FIELDS: [&str; 4] = ["title", "code_name", "section", "year"];

static CASE_PATTERN: OnceLock<Regex> = OnceLock::new();
static STATUTE_PATTERN: OnceLock<Regex> = OnceLock::new();
static LEAD_PARTY_PATTERN: OnceLock<Regex> = OnceLock::new();
static SECTION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn case_pattern() -> &'static Regex {
    CASE_PATTERN.get_or_init(|| {
        Regex::new(r"^(.+?),\s*(\d+)\s+(.+?)\s+(\d+)\s*\((.+?)\s+(\d{4})\)$")
            .expect("case citation pattern compiles")
    })
}

fn statute_pattern() -> &'static Regex {
    STATUTE_PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\s+(.+?)\s+§\s+([^\s(]+)(?:\s*\((\d{4})\))?$")
            .expect("statute citation pattern compiles")
    })
}

fn lead_party_pattern() -> &'static Regex {
    LEAD_PARTY_PATTERN
        .get_or_init(|| Regex::new(r"^(.+?)\s+v\.").expect("lead party pattern compiles"))
}

fn section_pattern() -> &'static Regex {
    SECTION_PATTERN.get_or_init(|| Regex::new(r"§\s*([^\s(]+)").expect("section pattern compiles"))
}

fn collect_components(captures: &Captures<'_>, fields: &[&str]) -> BTreeMap<String, String> {
    fields
        .iter()
        .enumerate()
        .filter_map(|(index, field)| {
            captures
                .get(index + 1)
                .map(|matched| (field.to_string(), matched.as_str().to_string()))
        })
        .collect()
}

/// Recover structural components from citation text.
pub fn parse_citation(text: &str, kind: CitationKind) -> ParsedCitation {
    let matched = match kind {
        CitationKind::Case => case_pattern()
            .captures(text)
            .map(|captures| collect_components(&captures, &CASE_FIELDS)),
        CitationKind::Statute => statute_pattern()
            .captures(text)
            .map(|captures| collect_components(&captures, &STATUTE_FIELDS)),
        _ => None,
    };

    debug!(%kind, structured = matched.is_some(), "parsed citation text");

    let components =
        matched.unwrap_or_else(|| BTreeMap::from([("text".to_string(), text.to_string())]));

    ParsedCitation {
        original: text.to_string(),
        kind,
        components,
    }
}

/// Short form for subsequent references. Unrecognised input is returned as-is.
pub fn generate_short_form(text: &str, kind: CitationKind) -> String {
    match kind {
        CitationKind::Case => {
            let Some(lead) = lead_party_pattern()
                .captures(text)
                .and_then(|captures| captures.get(1))
                .map(|lead| lead.as_str().to_string())
            else {
                return text.to_string();
            };

            match case_pattern().captures(text) {
                Some(parts) => format!("{lead}, {} {} at {}", &parts[2], &parts[3], &parts[4]),
                None => lead,
            }
        }
        CitationKind::Statute => section_pattern()
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|section| format!("§ {}", section.as_str()))
            .unwrap_or_else(|| text.to_string()),
        _ => text.to_string(),
    }
}

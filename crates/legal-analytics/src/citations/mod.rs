//! Bluebook citation formatting, parsing, short forms and validation.

pub mod domain;
pub mod extract;
pub mod format;
pub mod parser;
pub mod validate;

pub use domain::{
    BookCitation, CaseCitation, Citation, CitationKind, CitationStyle, CitationValidation,
    ConstitutionCitation, JournalCitation, ParsedCitation, RegulationCitation, StatuteCitation,
    UnknownCitationKind,
};
pub use extract::{extract_authorities, ExtractedAuthorities};
pub use format::{
    format_book_citation, format_case_citation, format_citation, format_constitution_citation,
    format_journal_citation, format_multiple_citations, format_regulation_citation,
    format_statute_citation,
};
pub use parser::{generate_short_form, parse_citation};
pub use validate::validate_citation;

use crate::error::AnalyticsError;

impl From<UnknownCitationKind> for AnalyticsError {
    fn from(err: UnknownCitationKind) -> Self {
        AnalyticsError::InvalidArgument(err.to_string())
    }
}

//! Litigation analytics and citation engine.
//!
//! Every calculator here is a pure function of its inputs: case-strength
//! scoring, litigation cost estimation, damages, settlement ranges and
//! statute-of-limitations tracking, plus a Bluebook citation formatter and
//! parser. The HTTP boundary that exposes them lives in the service crate.

pub mod analytics;
pub mod boundary;
pub mod citations;
pub mod config;
pub mod error;
pub mod telemetry;

pub use analytics::{
    compute_case_strength, compute_damages, compute_settlement_range,
    compute_statute_of_limitations, estimate_litigation_costs, evaluate_clause_strength,
    identify_red_flags, overall_document_score, AnalyticsConfig,
};
pub use citations::{
    extract_authorities, format_citation, format_multiple_citations, generate_short_form,
    parse_citation, validate_citation, Citation, CitationKind, CitationStyle,
};
pub use error::{AnalyticsError, AppError};

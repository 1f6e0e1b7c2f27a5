use tracing::debug;

use super::domain::{
    BookCitation, CaseCitation, Citation, CitationStyle, ConstitutionCitation, JournalCitation,
    RegulationCitation, StatuteCitation,
};

fn is_federal(jurisdiction: Option<&str>) -> bool {
    jurisdiction.is_some_and(|value| {
        let value = value.trim();
        ["federal", "us", "u.s.", "united states"]
            .iter()
            .any(|candidate| value.eq_ignore_ascii_case(candidate))
    })
}

fn year_suffix(year: Option<&str>) -> String {
    year.map(|year| format!(" ({year})")).unwrap_or_default()
}

/// `<case_name>, <volume> <reporter> <page> (<court> <year>)`.
pub fn format_case_citation(citation: &CaseCitation) -> String {
    let (Some(case_name), Some(year)) = (citation.case_name.as_deref(), citation.year.as_deref())
    else {
        return String::new();
    };

    let mut out = case_name.to_string();
    if let (Some(volume), Some(reporter), Some(page)) = (
        citation.volume.as_deref(),
        citation.reporter.as_deref(),
        citation.page.as_deref(),
    ) {
        out.push_str(&format!(", {volume} {reporter} {page}"));
    }

    match citation.court.as_deref() {
        Some(court) => out.push_str(&format!(" ({court} {year})")),
        None => out.push_str(&year_suffix(Some(year))),
    }
    out
}

/// Federal: `<title> U.S.C. § <section> (<year>)`; state codes use the code name
/// or `<jurisdiction> Code`.
pub fn format_statute_citation(citation: &StatuteCitation) -> String {
    let Some(section) = citation.code_section.as_deref() else {
        return String::new();
    };

    let mut out = if is_federal(citation.jurisdiction.as_deref()) {
        let Some(title) = citation.title.as_deref() else {
            return String::new();
        };
        format!("{title} U.S.C. § {section}")
    } else if let Some(code_name) = citation.code_name.as_deref() {
        format!("{code_name} § {section}")
    } else {
        let jurisdiction = citation.jurisdiction.as_deref().unwrap_or("State");
        format!("{jurisdiction} Code § {section}")
    };

    out.push_str(&year_suffix(citation.year.as_deref()));
    out
}

/// A missing jurisdiction is read as the federal constitution.
pub fn format_constitution_citation(citation: &ConstitutionCitation) -> String {
    let section = citation.section.as_deref();
    let federal = citation.jurisdiction.is_none() || is_federal(citation.jurisdiction.as_deref());

    if federal {
        if let Some(amendment) = citation.amendment.as_deref() {
            let mut out = format!("U.S. Const. amend. {amendment}");
            if let Some(section) = section {
                out.push_str(&format!(", § {section}"));
            }
            return out;
        }

        let Some(article) = citation.article.as_deref() else {
            return String::new();
        };
        let mut out = format!("U.S. Const. art. {article}");
        if let Some(section) = section {
            out.push_str(&format!(", § {section}"));
        }
        if let Some(clause) = citation.clause.as_deref() {
            out.push_str(&format!(", cl. {clause}"));
        }
        return out;
    }

    let Some(jurisdiction) = citation.jurisdiction.as_deref() else {
        return String::new();
    };
    let mut out = format!("{jurisdiction} Const.");
    if let Some(article) = citation.article.as_deref() {
        out.push_str(&format!(" art. {article}"));
    }
    if let Some(section) = section {
        out.push_str(&format!(", § {section}"));
    }
    out
}

/// `[<author>, ]<title>, <volume> <journal> <page> (<year>)`.
pub fn format_journal_citation(citation: &JournalCitation) -> String {
    let (Some(title), Some(journal), Some(year)) = (
        citation.title.as_deref(),
        citation.journal.as_deref(),
        citation.year.as_deref(),
    ) else {
        return String::new();
    };

    let source = match (citation.volume.as_deref(), citation.page.as_deref()) {
        (Some(volume), Some(page)) => format!("{volume} {journal} {page}"),
        _ => journal.to_string(),
    };
    let body = format!("{title}, {source}{}", year_suffix(Some(year)));
    match citation.author.as_deref() {
        Some(author) => format!("{author}, {body}"),
        None => body,
    }
}

/// `<author>, <title>[, at <page>][ (<edition> ed. <year>)]`.
pub fn format_book_citation(citation: &BookCitation) -> String {
    let (Some(author), Some(title)) = (citation.author.as_deref(), citation.title.as_deref())
    else {
        return String::new();
    };

    let mut out = format!("{author}, {title}");
    if let Some(page) = citation.page.as_deref() {
        out.push_str(&format!(", at {page}"));
    }
    let suffix = match (citation.edition.as_deref(), citation.year.as_deref()) {
        (Some(edition), Some(year)) => format!(" ({edition} ed. {year})"),
        (Some(edition), None) => format!(" ({edition} ed.)"),
        (None, year) => year_suffix(year),
    };
    out.push_str(&suffix);
    out
}

/// Federal: `<title> C.F.R. § <section> (<year>)`; state: `<jurisdiction> Reg. § <section> (<year>)`.
pub fn format_regulation_citation(citation: &RegulationCitation) -> String {
    let Some(section) = citation.section.as_deref() else {
        return String::new();
    };

    let mut out = if is_federal(citation.jurisdiction.as_deref()) {
        let Some(title) = citation.title.as_deref() else {
            return String::new();
        };
        format!("{title} C.F.R. § {section}")
    } else {
        let jurisdiction = citation.jurisdiction.as_deref().unwrap_or("State");
        format!("{jurisdiction} Reg. § {section}")
    };

    out.push_str(&year_suffix(citation.year.as_deref()));
    out
}

/// Dispatch on the citation variant. Empty when mandatory fields are missing.
pub fn format_citation(citation: &Citation) -> String {
    match citation {
        Citation::Case(case) => format_case_citation(case),
        Citation::Statute(statute) => format_statute_citation(statute),
        Citation::Constitution(constitution) => format_constitution_citation(constitution),
        Citation::Journal(journal) => format_journal_citation(journal),
        Citation::Book(book) => format_book_citation(book),
        Citation::Regulation(regulation) => format_regulation_citation(regulation),
    }
}

/// Format each citation, drop the empty ones, and join with `"; "`.
pub fn format_multiple_citations(citations: &[Citation], style: CitationStyle) -> String {
    let formatted: Vec<String> = citations
        .iter()
        .map(format_citation)
        .filter(|text| !text.is_empty())
        .collect();

    debug!(
        ?style,
        requested = citations.len(),
        formatted = formatted.len(),
        "formatted citation string"
    );

    formatted.join("; ")
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::boundary::deserialize_optional_text;

/// A citation to format, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Citation {
    Case(CaseCitation),
    Statute(StatuteCitation),
    Constitution(ConstitutionCitation),
    #[serde(alias = "article")]
    Journal(JournalCitation),
    Book(BookCitation),
    Regulation(RegulationCitation),
}

impl Citation {
    pub fn kind(&self) -> CitationKind {
        match self {
            Citation::Case(_) => CitationKind::Case,
            Citation::Statute(_) => CitationKind::Statute,
            Citation::Constitution(_) => CitationKind::Constitution,
            Citation::Journal(_) => CitationKind::Journal,
            Citation::Book(_) => CitationKind::Book,
            Citation::Regulation(_) => CitationKind::Regulation,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseCitation {
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatuteCitation {
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub code_section: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub code_name: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstitutionCitation {
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub amendment: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalCitation {
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookCitation {
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulationCitation {
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Case,
    Statute,
    Constitution,
    Journal,
    Book,
    Regulation,
}

impl CitationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            CitationKind::Case => "case",
            CitationKind::Statute => "statute",
            CitationKind::Constitution => "constitution",
            CitationKind::Journal => "journal",
            CitationKind::Book => "book",
            CitationKind::Regulation => "regulation",
        }
    }
}

impl fmt::Display for CitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown citation type `{0}`")]
pub struct UnknownCitationKind(pub String);

impl FromStr for CitationKind {
    type Err = UnknownCitationKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "case" => Ok(Self::Case),
            "statute" => Ok(Self::Statute),
            "constitution" => Ok(Self::Constitution),
            "journal" | "article" => Ok(Self::Journal),
            "book" => Ok(Self::Book),
            "regulation" => Ok(Self::Regulation),
            _ => Err(UnknownCitationKind(value.to_string())),
        }
    }
}

/// Only Bluebook is produced today; the field keeps the call shape stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    #[default]
    Bluebook,
}

/// Structural pieces recovered from citation text. `components` is
/// `{"text": original}` when the text does not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCitation {
    pub original: String,
    #[serde(rename = "type")]
    pub kind: CitationKind,
    pub components: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
}

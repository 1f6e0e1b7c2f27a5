//! Factual analogy scoring between a matter and candidate precedents.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::round_to;

const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "a", "an",
    "is", "was", "are", "were", "been", "have", "has", "had", "will", "would", "could", "should",
];

const MAX_KEY_TERMS: usize = 10;
const MAX_STRONGEST: usize = 3;

static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn word_pattern() -> &'static Regex {
    WORD_PATTERN.get_or_init(|| Regex::new(r"\b[a-z]+\b").expect("word pattern compiles"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecedentCandidate {
    pub case_name: String,
    #[serde(default)]
    pub holding: String,
    #[serde(default)]
    pub legal_issues: String,
}

impl PrecedentCandidate {
    fn fact_text(&self) -> String {
        format!("{} {}", self.holding, self.legal_issues)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalogyParameters {
    pub target_facts: String,
    #[serde(default)]
    pub candidates: Vec<PrecedentCandidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalogyStrength {
    Strong,
    Moderate,
    Weak,
}

impl AnalogyStrength {
    pub fn from_score(score: f64) -> Self {
        if score > 7.0 {
            Self::Strong
        } else if score > 4.0 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub case_name: String,
    pub similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analogy {
    pub case_name: String,
    pub similarity_score: f64,
    pub analogy_strength: AnalogyStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyResult {
    pub key_terms: Vec<String>,
    pub similarity_scores: Vec<SimilarityScore>,
    pub strongest_analogies: Vec<Analogy>,
    pub confidence: f64,
}

/// Lower-cased words longer than three letters, minus stop words, first ten kept.
pub fn key_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|word| word.as_str())
        .filter(|word| word.len() > 3 && !STOP_WORDS.contains(word))
        .take(MAX_KEY_TERMS)
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap of key terms, scaled to 0..=10 with one decimal.
pub fn similarity(target_terms: &BTreeSet<String>, text: &str) -> f64 {
    let candidate_terms: BTreeSet<String> = key_terms(text).into_iter().collect();
    let union = target_terms.union(&candidate_terms).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = target_terms.intersection(&candidate_terms).count();
    round_to(intersection as f64 / union as f64 * 10.0, 1)
}

/// Confidence in an outcome prediction given how many comparable cases exist.
pub fn analogy_confidence(candidate_count: usize) -> f64 {
    if candidate_count == 0 {
        return 0.3;
    }
    round_to((0.4 + candidate_count as f64 * 0.1).min(0.9), 2)
}

pub fn find_analogies(params: &AnalogyParameters) -> AnalogyResult {
    let terms = key_terms(&params.target_facts);
    let target_terms: BTreeSet<String> = terms.iter().cloned().collect();

    let similarity_scores: Vec<SimilarityScore> = params
        .candidates
        .iter()
        .map(|candidate| SimilarityScore {
            case_name: candidate.case_name.clone(),
            similarity_score: similarity(&target_terms, &candidate.fact_text()),
        })
        .collect();

    let mut ranked = similarity_scores.clone();
    ranked.sort_by(|left, right| {
        right
            .similarity_score
            .partial_cmp(&left.similarity_score)
            .unwrap_or(Ordering::Equal)
    });

    let strongest_analogies = ranked
        .into_iter()
        .take(MAX_STRONGEST)
        .map(|entry| Analogy {
            analogy_strength: AnalogyStrength::from_score(entry.similarity_score),
            case_name: entry.case_name,
            similarity_score: entry.similarity_score,
        })
        .collect();

    debug!(
        candidates = params.candidates.len(),
        key_terms = terms.len(),
        "scored factual analogies"
    );

    AnalogyResult {
        key_terms: terms,
        similarity_scores,
        strongest_analogies,
        confidence: analogy_confidence(params.candidates.len()),
    }
}

//! Keyword heuristics for contract review.
//!
//! Clause strength starts from a neutral score and moves by a fixed weight for
//! every protective or one-sided term the clause contains. Terms match as
//! case-insensitive substrings and count once each, however often they appear.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ladder::{RecommendationLadder, Rule};
use super::round_to;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

impl TermWeight {
    fn new(term: &str, weight: f64) -> Self {
        Self {
            term: term.to_string(),
            weight,
        }
    }
}

/// Section weights for the overall document score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewWeights {
    pub compliance: f64,
    pub risk: f64,
    pub enforceability: f64,
    pub legal: f64,
}

impl Default for ReviewWeights {
    fn default() -> Self {
        Self {
            compliance: 0.3,
            risk: 0.3,
            enforceability: 0.2,
            legal: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseConfig {
    /// Score of a clause with no recognised terms, and of a review with no section scores.
    pub neutral_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub strength_terms: Vec<TermWeight>,
    pub weakness_terms: Vec<TermWeight>,
    pub review_weights: ReviewWeights,
    pub red_flag_terms: Vec<String>,
}

impl Default for ClauseConfig {
    fn default() -> Self {
        Self {
            neutral_score: 6.0,
            min_score: 1.0,
            max_score: 10.0,
            strength_terms: vec![
                TermWeight::new("reasonable", 0.2),
                TermWeight::new("material", 0.2),
                TermWeight::new("written notice", 0.3),
                TermWeight::new("cure period", 0.3),
                TermWeight::new("mutual", 0.2),
            ],
            weakness_terms: vec![
                TermWeight::new("sole discretion", -0.4),
                TermWeight::new("unlimited", -0.5),
                TermWeight::new("waive", -0.3),
                TermWeight::new("as is", -0.2),
            ],
            review_weights: ReviewWeights::default(),
            red_flag_terms: [
                "unlimited liability",
                "sole discretion",
                "perpetual",
                "irrevocable",
                "personal guarantee",
                "liquidated damages",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClauseParameters {
    pub clause_text: String,
    /// Label such as `termination` or `indemnification`; echoed back, not scored.
    pub clause_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseAssessment {
    pub clause_type: String,
    pub strength_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub risk_level: ClauseRisk,
    pub red_flags: Vec<String>,
    pub recommendation: String,
}

/// Section scores from a document review, each on a 0-10 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewScores {
    pub compliance: Option<f64>,
    pub risk: Option<f64>,
    pub enforceability: Option<f64>,
    pub legal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentReviewParameters {
    pub scores: ReviewScores,
    pub document_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReview {
    pub overall_score: f64,
    pub red_flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClauseSignals {
    pub one_sided: bool,
    pub qualified: bool,
}

fn is_one_sided(signals: &ClauseSignals) -> bool {
    signals.one_sided
}

fn is_qualified(signals: &ClauseSignals) -> bool {
    signals.qualified
}

static CLAUSE_RULES: [Rule<ClauseSignals>; 2] = [
    Rule {
        key: "one_sided",
        applies: is_one_sided,
        message: "Clause leaves open-ended exposure with one party; negotiate a cap or an objective standard.",
    },
    Rule {
        key: "qualified",
        applies: is_qualified,
        message: "Clause relies on qualified standards; confirm the thresholds are defined in the agreement.",
    },
];

pub static CLAUSE_LADDER: RecommendationLadder<ClauseSignals> = RecommendationLadder::new(
    &CLAUSE_RULES,
    "Clause reads as standard language with no unusual allocation of risk.",
);

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

fn matched_terms<'a>(text: &str, terms: &'a [TermWeight]) -> impl Iterator<Item = &'a TermWeight> {
    let text = text.to_lowercase();
    terms
        .iter()
        .filter(move |entry| text.contains(&entry.term.to_lowercase()))
}

#[derive(Debug, Clone, Default)]
pub struct ClauseReviewer {
    config: ClauseConfig,
}

impl ClauseReviewer {
    pub fn new(config: ClauseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClauseConfig {
        &self.config
    }

    pub fn evaluate(&self, params: &ClauseParameters) -> ClauseAssessment {
        let strengths: Vec<&TermWeight> =
            matched_terms(&params.clause_text, &self.config.strength_terms).collect();
        let weaknesses: Vec<&TermWeight> =
            matched_terms(&params.clause_text, &self.config.weakness_terms).collect();

        let raw = self.config.neutral_score
            + strengths.iter().map(|entry| entry.weight).sum::<f64>()
            + weaknesses.iter().map(|entry| entry.weight).sum::<f64>();
        let strength_score =
            round_to(raw.clamp(self.config.min_score, self.config.max_score), 2);

        let lowered = params.clause_text.to_lowercase();
        let signals = ClauseSignals {
            one_sided: contains_any(&lowered, &["unlimited", "sole discretion"]),
            qualified: contains_any(&lowered, &["reasonable", "material"]),
        };
        let risk_level = if signals.one_sided {
            ClauseRisk::High
        } else if signals.qualified {
            ClauseRisk::Medium
        } else {
            ClauseRisk::Low
        };

        debug!(
            clause_type = %params.clause_type,
            strength_score,
            ?risk_level,
            "evaluated clause"
        );

        ClauseAssessment {
            clause_type: params.clause_type.clone(),
            strength_score,
            strengths: strengths.iter().map(|entry| entry.term.clone()).collect(),
            weaknesses: weaknesses.iter().map(|entry| entry.term.clone()).collect(),
            risk_level,
            red_flags: self.red_flags(&params.clause_text),
            recommendation: CLAUSE_LADDER.recommend(&signals),
        }
    }

    /// Weighted mean over the sections present, to one decimal.
    pub fn overall_score(&self, scores: &ReviewScores) -> f64 {
        let weights = &self.config.review_weights;
        let (total, weight) = [
            (scores.compliance, weights.compliance),
            (scores.risk, weights.risk),
            (scores.enforceability, weights.enforceability),
            (scores.legal, weights.legal),
        ]
        .into_iter()
        .filter_map(|(score, weight)| score.map(|score| (score * weight, weight)))
        .fold((0.0, 0.0), |(total, sum), (part, weight)| {
            (total + part, sum + weight)
        });

        if weight > 0.0 {
            round_to(total / weight, 1)
        } else {
            self.config.neutral_score
        }
    }

    /// One `Contains <term> clause` entry per red-flag term found, in table order.
    pub fn red_flags(&self, document_text: &str) -> Vec<String> {
        let lowered = document_text.to_lowercase();
        self.config
            .red_flag_terms
            .iter()
            .filter(|term| lowered.contains(&term.to_lowercase()))
            .map(|term| format!("Contains {term} clause"))
            .collect()
    }

    pub fn review_document(&self, params: &DocumentReviewParameters) -> DocumentReview {
        DocumentReview {
            overall_score: self.overall_score(&params.scores),
            red_flags: self.red_flags(&params.document_text),
        }
    }
}

pub fn evaluate_clause_strength(params: &ClauseParameters) -> ClauseAssessment {
    ClauseReviewer::default().evaluate(params)
}

pub fn overall_document_score(scores: &ReviewScores) -> f64 {
    ClauseReviewer::default().overall_score(scores)
}

pub fn identify_red_flags(document_text: &str) -> Vec<String> {
    ClauseReviewer::default().red_flags(document_text)
}

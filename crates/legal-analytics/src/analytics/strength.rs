use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::ladder::{RecommendationLadder, Rule};
use super::round_to;

/// Named sub-factors recognised by the case-strength rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    PrecedentSupport,
    FactualStrength,
    LegalAuthority,
    JurisdictionalFactors,
    OpposingArguments,
    EvidenceQuality,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 6] = [
        ScoreFactor::PrecedentSupport,
        ScoreFactor::FactualStrength,
        ScoreFactor::LegalAuthority,
        ScoreFactor::JurisdictionalFactors,
        ScoreFactor::OpposingArguments,
        ScoreFactor::EvidenceQuality,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ScoreFactor::PrecedentSupport => "precedent_support",
            ScoreFactor::FactualStrength => "factual_strength",
            ScoreFactor::LegalAuthority => "legal_authority",
            ScoreFactor::JurisdictionalFactors => "jurisdictional_factors",
            ScoreFactor::OpposingArguments => "opposing_arguments",
            ScoreFactor::EvidenceQuality => "evidence_quality",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|factor| factor.name() == name)
    }

    /// Strong opposing arguments weaken the case, so this factor counts as `10 - score`.
    pub const fn is_inverted(self) -> bool {
        matches!(self, ScoreFactor::OpposingArguments)
    }
}

/// Raw factor scores keyed by name. Unknown names stay in the map and are
/// skipped during scoring; non-numeric JSON values are dropped on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreFactors(BTreeMap<String, f64>);

impl ScoreFactors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, factor: ScoreFactor, score: f64) -> Self {
        self.0.insert(factor.name().to_string(), score);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        self.0.insert(name.into(), score);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ScoreFactors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(name, value)| value.as_f64().map(|score| (name, score)))
                .collect(),
        ))
    }
}

impl FromIterator<(ScoreFactor, f64)> for ScoreFactors {
    fn from_iter<I: IntoIterator<Item = (ScoreFactor, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(factor, score)| (factor.name().to_string(), score))
                .collect(),
        )
    }
}

/// Fixed rubric weights. The defaults sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub precedent_support: f64,
    pub factual_strength: f64,
    pub legal_authority: f64,
    pub jurisdictional_factors: f64,
    pub opposing_arguments: f64,
    pub evidence_quality: f64,
}

impl FactorWeights {
    pub fn weight(&self, factor: ScoreFactor) -> f64 {
        match factor {
            ScoreFactor::PrecedentSupport => self.precedent_support,
            ScoreFactor::FactualStrength => self.factual_strength,
            ScoreFactor::LegalAuthority => self.legal_authority,
            ScoreFactor::JurisdictionalFactors => self.jurisdictional_factors,
            ScoreFactor::OpposingArguments => self.opposing_arguments,
            ScoreFactor::EvidenceQuality => self.evidence_quality,
        }
    }

    pub fn total(&self) -> f64 {
        ScoreFactor::ALL
            .into_iter()
            .map(|factor| self.weight(factor))
            .sum()
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            precedent_support: 0.25,
            factual_strength: 0.20,
            legal_authority: 0.20,
            jurisdictional_factors: 0.15,
            opposing_arguments: 0.10,
            evidence_quality: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub weights: FactorWeights,
    pub high_confidence_min_factors: usize,
    pub high_confidence_min_score: f64,
    pub medium_confidence_min_factors: usize,
    pub medium_confidence_min_score: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            high_confidence_min_factors: 5,
            high_confidence_min_score: 7.0,
            medium_confidence_min_factors: 3,
            medium_confidence_min_score: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// How a single factor fed the weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorContribution {
    pub score: f64,
    pub adjusted_score: f64,
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: BTreeMap<ScoreFactor, FactorContribution>,
    pub confidence: Confidence,
    pub recommendation: String,
}

static STRENGTH_RULES: [Rule<f64>; 3] = [
    Rule {
        key: "strong",
        applies: strong_case,
        message: "Strong case. Precedent and evidence support proceeding with litigation.",
    },
    Rule {
        key: "moderate",
        applies: moderate_case,
        message: "Moderately strong case. Proceed, but shore up the weaker factors before trial.",
    },
    Rule {
        key: "weak",
        applies: weak_case,
        message: "Weak case. Consider early settlement or alternative dispute resolution.",
    },
];

fn strong_case(score: &f64) -> bool {
    *score >= 8.0
}

fn moderate_case(score: &f64) -> bool {
    *score >= 6.0
}

fn weak_case(score: &f64) -> bool {
    *score >= 4.0
}

pub static STRENGTH_LADDER: RecommendationLadder<f64> = RecommendationLadder::new(
    &STRENGTH_RULES,
    "Very weak case. Litigation is not advisable without substantial additional support.",
);

/// Weighted case-strength rubric.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoreConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn score(&self, factors: &ScoreFactors) -> ScoreResult {
        let mut breakdown = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (name, raw) in factors.iter() {
            let Some(factor) = ScoreFactor::from_name(name) else {
                continue;
            };
            if !(0.0..=10.0).contains(&raw) {
                continue;
            }

            let adjusted = if factor.is_inverted() { 10.0 - raw } else { raw };
            let weight = self.config.weights.weight(factor);
            let contribution = adjusted * weight;

            weighted_sum += contribution;
            weight_total += weight;
            breakdown.insert(
                factor,
                FactorContribution {
                    score: raw,
                    adjusted_score: adjusted,
                    weight,
                    contribution,
                },
            );
        }

        let score = if weight_total > 0.0 {
            round_to(weighted_sum / weight_total, 2).clamp(0.0, 10.0)
        } else {
            0.0
        };
        let confidence = self.confidence(breakdown.len(), score);

        debug!(
            supplied = factors.len(),
            valid = breakdown.len(),
            score,
            ?confidence,
            "computed case strength"
        );

        ScoreResult {
            score,
            breakdown,
            confidence,
            recommendation: STRENGTH_LADDER.recommend(&score),
        }
    }

    fn confidence(&self, valid_factors: usize, score: f64) -> Confidence {
        let config = &self.config;
        if valid_factors >= config.high_confidence_min_factors
            && score >= config.high_confidence_min_score
        {
            Confidence::High
        } else if valid_factors >= config.medium_confidence_min_factors
            && score >= config.medium_confidence_min_score
        {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Score with the default rubric.
pub fn compute_case_strength(factors: &ScoreFactors) -> ScoreResult {
    ScoreEngine::default().score(factors)
}

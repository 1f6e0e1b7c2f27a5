//! Litigation calculators.
//!
//! Each calculator is stateless apart from its immutable configuration table,
//! so a single instance can be shared freely across threads. Composition is
//! left to the caller: the settlement model takes a strength score and a cost
//! total as plain numbers rather than calling the other calculators.

pub mod analogy;
pub mod clause;
pub mod costs;
pub mod damages;
pub mod ladder;
pub mod limitations;
pub mod settlement;
pub mod strength;

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use analogy::{find_analogies, AnalogyParameters, AnalogyResult, PrecedentCandidate};
pub use clause::{
    evaluate_clause_strength, identify_red_flags, overall_document_score, ClauseAssessment,
    ClauseConfig, ClauseParameters, ClauseReviewer, ClauseRisk, DocumentReview,
    DocumentReviewParameters, ReviewScores,
};
pub use costs::{
    estimate_litigation_costs, CaseType, Complexity, CostConfig, CostEstimator, CostParameters,
    CostResult, Forum,
};
pub use damages::{
    compute_damages, DamageParameters, DamageResult, DamagesCalculator, DamagesConfig,
};
pub use ladder::{RecommendationLadder, Rule};
pub use limitations::{
    compute_statute_of_limitations, ClaimPeriod, LimitationParameters, LimitationResult,
    LimitationsClock, LimitationsConfig,
};
pub use settlement::{
    compute_settlement_range, RiskTolerance, SettlementConfig, SettlementParameters,
    SettlementRangeModel, SettlementResult,
};
pub use strength::{
    compute_case_strength, Confidence, ScoreConfig, ScoreEngine, ScoreFactor, ScoreFactors,
    ScoreResult,
};

/// Every lookup table the calculators consume, overridable as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub score: ScoreConfig,
    pub costs: CostConfig,
    pub damages: DamagesConfig,
    pub settlement: SettlementConfig,
    pub limitations: LimitationsConfig,
    pub clause: ClauseConfig,
}

/// Every calculator built from one configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    score: ScoreEngine,
    costs: CostEstimator,
    damages: DamagesCalculator,
    settlement: SettlementRangeModel,
    limitations: LimitationsClock,
    clause: ClauseReviewer,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        let AnalyticsConfig {
            score,
            costs,
            damages,
            settlement,
            limitations,
            clause,
        } = config;

        Self {
            score: ScoreEngine::new(score),
            costs: CostEstimator::new(costs),
            damages: DamagesCalculator::new(damages),
            settlement: SettlementRangeModel::new(settlement),
            limitations: LimitationsClock::new(limitations),
            clause: ClauseReviewer::new(clause),
        }
    }

    pub fn case_strength(&self, factors: &ScoreFactors) -> ScoreResult {
        self.score.score(factors)
    }

    pub fn litigation_costs(&self, params: &CostParameters) -> CostResult {
        self.costs.estimate(params)
    }

    pub fn damages(&self, params: &DamageParameters) -> DamageResult {
        self.damages.compute(params)
    }

    pub fn settlement_range(&self, params: &SettlementParameters) -> SettlementResult {
        self.settlement.compute(params)
    }

    pub fn statute_of_limitations(
        &self,
        params: &LimitationParameters,
        today: NaiveDate,
    ) -> LimitationResult {
        self.limitations.compute(params, today)
    }

    pub fn clause_strength(&self, params: &ClauseParameters) -> ClauseAssessment {
        self.clause.evaluate(params)
    }

    pub fn document_review(&self, params: &DocumentReviewParameters) -> DocumentReview {
        self.clause.review_document(params)
    }
}

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

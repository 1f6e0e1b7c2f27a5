use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ladder::{RecommendationLadder, Rule};
use super::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl From<String> for RiskTolerance {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

/// Inputs for the negotiation range. `case_strength` and `litigation_costs`
/// are usually the outputs of the strength rubric and the cost estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettlementParameters {
    pub damage_estimate: f64,
    pub case_strength: f64,
    pub litigation_costs: f64,
    pub time_to_trial_months: f64,
    pub risk_tolerance: RiskTolerance,
}

impl Default for SettlementParameters {
    fn default() -> Self {
        Self {
            damage_estimate: 0.0,
            case_strength: 5.0,
            litigation_costs: 0.0,
            time_to_trial_months: 12.0,
            risk_tolerance: RiskTolerance::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl RiskFactors {
    pub fn factor(&self, tolerance: RiskTolerance) -> f64 {
        match tolerance {
            RiskTolerance::Low => self.low,
            RiskTolerance::Medium => self.medium,
            RiskTolerance::High => self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub risk_factors: RiskFactors,
    pub minimum_value_share: f64,
    pub minimum_cost_share: f64,
    pub maximum_value_share: f64,
    pub optimal_cost_share: f64,
    /// Monthly discount applied as `1 - months / discount_horizon_months`.
    pub discount_horizon_months: f64,
    pub min_time_discount: f64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            risk_factors: RiskFactors {
                low: 0.6,
                medium: 0.7,
                high: 0.8,
            },
            minimum_value_share: 0.6,
            minimum_cost_share: 0.5,
            maximum_value_share: 1.2,
            optimal_cost_share: 0.3,
            discount_horizon_months: 100.0,
            min_time_discount: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementFactors {
    pub case_strength: f64,
    pub risk_adjustment: f64,
    pub time_discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub minimum_acceptable: f64,
    pub optimal_target: f64,
    pub maximum_reasonable: f64,
    pub expected_value: f64,
    pub recommendation: String,
    pub factors: SettlementFactors,
}

static SETTLEMENT_RULES: [Rule<f64>; 3] = [
    Rule {
        key: "strong",
        applies: strong_position,
        message: "Strong position. Negotiate toward the maximum and be prepared to proceed to trial.",
    },
    Rule {
        key: "moderate",
        applies: moderate_position,
        message: "Moderate position. Target the optimal figure and trade concessions for certainty.",
    },
    Rule {
        key: "weak",
        applies: weak_position,
        message: "Weak position. Prioritise early settlement near the minimum acceptable figure.",
    },
];

fn strong_position(case_strength: &f64) -> bool {
    *case_strength >= 8.0
}

fn moderate_position(case_strength: &f64) -> bool {
    *case_strength >= 6.0
}

fn weak_position(case_strength: &f64) -> bool {
    *case_strength <= 4.0
}

pub static SETTLEMENT_LADDER: RecommendationLadder<f64> = RecommendationLadder::new(
    &SETTLEMENT_RULES,
    "Balanced position. Open near the optimal target and reassess after discovery.",
);

#[derive(Debug, Clone, Default)]
pub struct SettlementRangeModel {
    config: SettlementConfig,
}

impl SettlementRangeModel {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    pub fn compute(&self, params: &SettlementParameters) -> SettlementResult {
        let config = &self.config;
        let damage_estimate = params.damage_estimate.max(0.0);
        let case_strength = params.case_strength.clamp(0.0, 10.0);
        let litigation_costs = params.litigation_costs.max(0.0);

        let risk_factor = config.risk_factors.factor(params.risk_tolerance);
        let strength_multiplier = case_strength / 10.0;
        let expected_value = damage_estimate * strength_multiplier * risk_factor;

        let time_discount = (1.0
            - params.time_to_trial_months.max(0.0) / config.discount_horizon_months)
            .max(config.min_time_discount);

        let minimum = (expected_value * config.minimum_value_share
            - litigation_costs * config.minimum_cost_share)
            * time_discount;
        let maximum = expected_value * config.maximum_value_share;
        let optimal = (expected_value - litigation_costs * config.optimal_cost_share) * time_discount;

        debug!(
            expected_value,
            risk_factor, time_discount, "computed settlement range"
        );

        SettlementResult {
            minimum_acceptable: round_to(minimum.max(0.0), 2),
            optimal_target: round_to(optimal, 2),
            maximum_reasonable: round_to(maximum, 2),
            expected_value: round_to(expected_value, 2),
            recommendation: SETTLEMENT_LADDER.recommend(&case_strength),
            factors: SettlementFactors {
                case_strength: strength_multiplier,
                risk_adjustment: risk_factor,
                time_discount,
            },
        }
    }
}

pub fn compute_settlement_range(params: &SettlementParameters) -> SettlementResult {
    SettlementRangeModel::default().compute(params)
}

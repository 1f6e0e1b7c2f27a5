use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ladder::{RecommendationLadder, Rule};
use super::round_to;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageParameters {
    /// Free-form label (e.g. `breach_of_contract`); it does not change the arithmetic.
    pub damage_type: String,
    pub economic_loss: f64,
    pub lost_profits: f64,
    pub medical_expenses: f64,
    pub pain_and_suffering: f64,
    pub punitive_multiplier: f64,
    pub interest_rate: f64,
    pub time_period_years: f64,
}

impl Default for DamageParameters {
    fn default() -> Self {
        Self {
            damage_type: "general".to_string(),
            economic_loss: 0.0,
            lost_profits: 0.0,
            medical_expenses: 0.0,
            pain_and_suffering: 0.0,
            punitive_multiplier: 0.0,
            interest_rate: 0.05,
            time_period_years: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamagesConfig {
    /// Emotional distress as a share of pain and suffering.
    pub emotional_distress_ratio: f64,
    /// Punitive-to-compensatory ratio above which due-process review is likely.
    pub punitive_ratio_ceiling: f64,
}

impl Default for DamagesConfig {
    fn default() -> Self {
        Self {
            emotional_distress_ratio: 0.5,
            punitive_ratio_ceiling: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatoryDamages {
    pub economic_loss: f64,
    pub lost_profits: f64,
    pub medical_expenses: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonEconomicDamages {
    pub pain_and_suffering: f64,
    pub emotional_distress: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub compensatory: CompensatoryDamages,
    pub non_economic: NonEconomicDamages,
    pub punitive: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub breakdown: DamageBreakdown,
    pub total_damages: f64,
    pub present_value: f64,
    pub recommendation: String,
}

pub struct DamageSignals {
    pub punitive_ratio: f64,
    pub punitive_ratio_ceiling: f64,
    pub compensatory: f64,
    pub non_economic: f64,
}

static DAMAGE_RULES: [Rule<DamageSignals>; 2] = [
    Rule {
        key: "punitive_ratio",
        applies: excessive_punitive_ratio,
        message: "Punitive damages exceed a single-digit ratio guideline (3:1); expect a constitutional due-process challenge.",
    },
    Rule {
        key: "non_economic_heavy",
        applies: non_economic_dominates,
        message: "Non-economic damages exceed compensatory damages; strengthen documentation with medical and expert testimony.",
    },
];

fn excessive_punitive_ratio(signals: &DamageSignals) -> bool {
    signals.punitive_ratio > signals.punitive_ratio_ceiling
}

fn non_economic_dominates(signals: &DamageSignals) -> bool {
    signals.non_economic > signals.compensatory
}

pub static DAMAGE_LADDER: RecommendationLadder<DamageSignals> = RecommendationLadder::new(
    &DAMAGE_RULES,
    "Damages calculation appears reasonable and supportable.",
);

#[derive(Debug, Clone, Default)]
pub struct DamagesCalculator {
    config: DamagesConfig,
}

impl DamagesCalculator {
    pub fn new(config: DamagesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DamagesConfig {
        &self.config
    }

    pub fn compute(&self, params: &DamageParameters) -> DamageResult {
        let economic_loss = params.economic_loss.max(0.0);
        let lost_profits = params.lost_profits.max(0.0);
        let medical_expenses = params.medical_expenses.max(0.0);
        let pain_and_suffering = params.pain_and_suffering.max(0.0);
        let multiplier = params.punitive_multiplier.max(0.0);
        let rate = params.interest_rate.max(0.0);
        let years = params.time_period_years.max(0.0);

        // Components are settled in cents first so the total is their exact sum.
        let compensatory_total = round_to(economic_loss + lost_profits + medical_expenses, 2);
        let emotional_distress = round_to(pain_and_suffering * self.config.emotional_distress_ratio, 2);
        let non_economic_total = round_to(pain_and_suffering + emotional_distress, 2);

        let base = compensatory_total + non_economic_total;
        let growth = (1.0 + rate).powf(years);
        let punitive = round_to(base * multiplier, 2);
        let interest = round_to(base * growth - base, 2);
        let total_damages = compensatory_total + non_economic_total + punitive + interest;
        let present_value = round_to(total_damages / growth, 2);

        // x/0 reads as unbounded when punitive damages exist and as no ratio otherwise.
        let punitive_ratio = if compensatory_total > 0.0 {
            punitive / compensatory_total
        } else if punitive > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        debug!(
            damage_type = %params.damage_type,
            compensatory_total,
            non_economic_total,
            punitive,
            total_damages,
            "computed damages"
        );

        let signals = DamageSignals {
            punitive_ratio,
            punitive_ratio_ceiling: self.config.punitive_ratio_ceiling,
            compensatory: compensatory_total,
            non_economic: non_economic_total,
        };

        DamageResult {
            breakdown: DamageBreakdown {
                compensatory: CompensatoryDamages {
                    economic_loss,
                    lost_profits,
                    medical_expenses,
                    total: compensatory_total,
                },
                non_economic: NonEconomicDamages {
                    pain_and_suffering,
                    emotional_distress,
                    total: non_economic_total,
                },
                punitive,
                interest,
            },
            total_damages,
            present_value,
            recommendation: DAMAGE_LADDER.recommend(&signals),
        }
    }
}

pub fn compute_damages(params: &DamageParameters) -> DamageResult {
    DamagesCalculator::default().compute(params)
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ladder::{RecommendationLadder, Rule};
use super::round_to;

/// Practice area of the matter. Unrecognised names fall back to `Other`,
/// which is billed like `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum CaseType {
    #[default]
    General,
    Contract,
    Employment,
    PersonalInjury,
    Other,
}

impl From<String> for CaseType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "general" => Self::General,
            "contract" => Self::Contract,
            "employment" => Self::Employment,
            "personal_injury" => Self::PersonalInjury,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl From<String> for Complexity {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" | "low" => Self::Simple,
            "complex" | "high" => Self::Complex,
            _ => Self::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Forum {
    #[default]
    State,
    Federal,
}

impl From<String> for Forum {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("federal") {
            Self::Federal
        } else {
            Self::State
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostParameters {
    pub case_type: CaseType,
    pub complexity: Complexity,
    pub jurisdiction: Forum,
    pub estimated_duration_months: f64,
    pub hourly_rate: f64,
    pub dispute_value: f64,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            case_type: CaseType::General,
            complexity: Complexity::Medium,
            jurisdiction: Forum::State,
            estimated_duration_months: 12.0,
            hourly_rate: 300.0,
            dispute_value: 0.0,
        }
    }
}

/// Attorney hours for one complexity tier, by practice area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseHours {
    pub general: f64,
    pub contract: f64,
    pub employment: f64,
    pub personal_injury: f64,
}

impl CaseHours {
    pub fn hours(&self, case_type: CaseType) -> f64 {
        match case_type {
            CaseType::Contract => self.contract,
            CaseType::Employment => self.employment,
            CaseType::PersonalInjury => self.personal_injury,
            CaseType::General | CaseType::Other => self.general,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourTable {
    pub simple: CaseHours,
    pub medium: CaseHours,
    pub complex: CaseHours,
}

impl HourTable {
    pub fn lookup(&self, complexity: Complexity, case_type: CaseType) -> f64 {
        let tier = match complexity {
            Complexity::Simple => &self.simple,
            Complexity::Medium => &self.medium,
            Complexity::Complex => &self.complex,
        };
        tier.hours(case_type)
    }
}

impl Default for HourTable {
    fn default() -> Self {
        Self {
            simple: CaseHours {
                general: 40.0,
                contract: 60.0,
                employment: 80.0,
                personal_injury: 50.0,
            },
            medium: CaseHours {
                general: 100.0,
                contract: 120.0,
                employment: 150.0,
                personal_injury: 130.0,
            },
            complex: CaseHours {
                general: 250.0,
                contract: 300.0,
                employment: 350.0,
                personal_injury: 320.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertFees {
    pub simple: f64,
    pub medium: f64,
    pub complex: f64,
}

impl ExpertFees {
    pub fn fee(&self, complexity: Complexity) -> f64 {
        match complexity {
            Complexity::Simple => self.simple,
            Complexity::Medium => self.medium,
            Complexity::Complex => self.complex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub base_hours: HourTable,
    pub federal_multiplier: f64,
    pub state_multiplier: f64,
    pub min_duration_multiplier: f64,
    pub federal_court_fees: f64,
    pub state_court_fees: f64,
    pub discovery_rate_per_hour: f64,
    pub expert_fees: ExpertFees,
    pub hours_per_deposition: f64,
    pub max_depositions: f64,
    pub cost_per_deposition: f64,
    pub administrative_rate: f64,
    pub contingency_rate: f64,
    pub expected_recovery_rate: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            base_hours: HourTable::default(),
            federal_multiplier: 1.3,
            state_multiplier: 1.0,
            min_duration_multiplier: 0.8,
            federal_court_fees: 1200.0,
            state_court_fees: 800.0,
            discovery_rate_per_hour: 50.0,
            expert_fees: ExpertFees {
                simple: 2500.0,
                medium: 7500.0,
                complex: 15000.0,
            },
            hours_per_deposition: 20.0,
            max_depositions: 15.0,
            cost_per_deposition: 1500.0,
            administrative_rate: 0.1,
            contingency_rate: 0.33,
            expected_recovery_rate: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub attorney_fees: f64,
    pub court_fees: f64,
    pub discovery_costs: f64,
    pub expert_witnesses: f64,
    pub depositions: f64,
    pub administrative: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.attorney_fees
            + self.court_fees
            + self.discovery_costs
            + self.expert_witnesses
            + self.depositions
            + self.administrative
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub breakdown: CostBreakdown,
    pub total_estimated_cost: f64,
    pub contingency_fee: f64,
    pub net_expected_value: f64,
    pub cost_benefit_ratio: f64,
    pub recommendation: String,
}

pub struct CostSignals {
    pub dispute_value: f64,
    pub cost_benefit_ratio: f64,
}

static COST_RULES: [Rule<CostSignals>; 3] = [
    Rule {
        key: "non_monetary",
        applies: non_monetary,
        message: "Non-monetary dispute: weigh litigation costs against the relief sought and consider ADR.",
    },
    Rule {
        key: "favorable",
        applies: favorable_ratio,
        message: "Favorable cost-benefit ratio. Litigation is economically justified.",
    },
    Rule {
        key: "moderate",
        applies: moderate_ratio,
        message: "Moderate cost-benefit ratio. Proceed with cost controls and keep settlement open.",
    },
];

fn non_monetary(signals: &CostSignals) -> bool {
    signals.dispute_value == 0.0
}

fn favorable_ratio(signals: &CostSignals) -> bool {
    signals.cost_benefit_ratio >= 3.0
}

fn moderate_ratio(signals: &CostSignals) -> bool {
    signals.cost_benefit_ratio >= 1.5
}

pub static COST_LADDER: RecommendationLadder<CostSignals> = RecommendationLadder::new(
    &COST_RULES,
    "Poor cost-benefit ratio. Expected costs approach or exceed the recovery; pursue settlement.",
);

#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    config: CostConfig,
}

impl CostEstimator {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    pub fn estimate(&self, params: &CostParameters) -> CostResult {
        let config = &self.config;
        let hours = config.base_hours.lookup(params.complexity, params.case_type);
        let hourly_rate = params.hourly_rate.max(0.0);
        let dispute_value = params.dispute_value.max(0.0);

        let jurisdiction_multiplier = match params.jurisdiction {
            Forum::Federal => config.federal_multiplier,
            Forum::State => config.state_multiplier,
        };
        let duration_multiplier =
            (params.estimated_duration_months.max(0.0) / 12.0).max(config.min_duration_multiplier);

        let attorney_fees = hours * hourly_rate * jurisdiction_multiplier * duration_multiplier;
        let breakdown = CostBreakdown {
            attorney_fees: round_to(attorney_fees, 2),
            court_fees: match params.jurisdiction {
                Forum::Federal => config.federal_court_fees,
                Forum::State => config.state_court_fees,
            },
            discovery_costs: round_to(hours * config.discovery_rate_per_hour, 2),
            expert_witnesses: config.expert_fees.fee(params.complexity),
            depositions: round_to(
                (hours / config.hours_per_deposition).min(config.max_depositions)
                    * config.cost_per_deposition,
                2,
            ),
            administrative: round_to(attorney_fees * config.administrative_rate, 2),
        };

        let total = round_to(breakdown.total(), 2);
        let expected_recovery = dispute_value * config.expected_recovery_rate;
        let cost_benefit_ratio = if dispute_value > 0.0 && total > 0.0 {
            round_to(expected_recovery / total, 2)
        } else {
            0.0
        };

        debug!(
            case_type = ?params.case_type,
            complexity = ?params.complexity,
            hours,
            total,
            cost_benefit_ratio,
            "estimated litigation costs"
        );

        let signals = CostSignals {
            dispute_value,
            cost_benefit_ratio,
        };

        CostResult {
            breakdown,
            total_estimated_cost: total,
            contingency_fee: round_to(dispute_value * config.contingency_rate, 2),
            net_expected_value: round_to(expected_recovery - total, 2),
            cost_benefit_ratio,
            recommendation: COST_LADDER.recommend(&signals),
        }
    }
}

pub fn estimate_litigation_costs(params: &CostParameters) -> CostResult {
    CostEstimator::default().estimate(params)
}

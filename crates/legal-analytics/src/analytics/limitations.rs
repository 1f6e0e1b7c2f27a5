use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ladder::{RecommendationLadder, Rule};
use crate::boundary::deserialize_optional_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitationParameters {
    pub claim_type: String,
    /// Sub-category for claim types that carry one, e.g. `oral` for contracts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_subtype: Option<String>,
    pub jurisdiction: String,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub discovery_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub accrual_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub filing_date: Option<NaiveDate>,
}

impl Default for LimitationParameters {
    fn default() -> Self {
        Self {
            claim_type: "general".to_string(),
            claim_subtype: None,
            jurisdiction: "Federal".to_string(),
            discovery_date: None,
            accrual_date: None,
            filing_date: None,
        }
    }
}

/// Limitation period for a claim type, either flat or split by sub-category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimPeriod {
    Years(u32),
    Subtypes(BTreeMap<String, u32>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitationsConfig {
    pub periods: BTreeMap<String, ClaimPeriod>,
    /// Jurisdiction-specific entries consulted before `periods`.
    pub jurisdiction_overrides: BTreeMap<String, BTreeMap<String, ClaimPeriod>>,
    pub default_years: u32,
    pub critical_days: i64,
    pub warning_days: i64,
}

impl Default for LimitationsConfig {
    fn default() -> Self {
        let mut periods = BTreeMap::new();
        periods.insert("general".to_string(), ClaimPeriod::Years(3));
        periods.insert("personal_injury".to_string(), ClaimPeriod::Years(2));
        periods.insert("medical_malpractice".to_string(), ClaimPeriod::Years(2));
        periods.insert("wrongful_death".to_string(), ClaimPeriod::Years(2));
        periods.insert("product_liability".to_string(), ClaimPeriod::Years(2));
        periods.insert("property_damage".to_string(), ClaimPeriod::Years(3));
        periods.insert("fraud".to_string(), ClaimPeriod::Years(3));
        periods.insert("defamation".to_string(), ClaimPeriod::Years(1));
        periods.insert(
            "contract".to_string(),
            ClaimPeriod::Subtypes(BTreeMap::from([
                ("written".to_string(), 6),
                ("oral".to_string(), 3),
            ])),
        );
        periods.insert(
            "employment".to_string(),
            ClaimPeriod::Subtypes(BTreeMap::from([
                ("general".to_string(), 2),
                ("discrimination".to_string(), 2),
                ("wage_and_hour".to_string(), 3),
            ])),
        );

        Self {
            periods,
            jurisdiction_overrides: BTreeMap::new(),
            default_years: 3,
            critical_days: 30,
            warning_days: 90,
        }
    }
}

impl LimitationsConfig {
    /// Period in years; unmapped types and sub-types use `default_years`.
    pub fn period_years(
        &self,
        claim_type: &str,
        claim_subtype: Option<&str>,
        jurisdiction: &str,
    ) -> u32 {
        let claim_type = normalize_key(claim_type);
        let entry = self
            .jurisdiction_overrides
            .get(&normalize_key(jurisdiction))
            .and_then(|table| table.get(&claim_type))
            .or_else(|| self.periods.get(&claim_type));

        match entry {
            Some(ClaimPeriod::Years(years)) => *years,
            Some(ClaimPeriod::Subtypes(subtypes)) => claim_subtype
                .map(normalize_key)
                .and_then(|subtype| subtypes.get(&subtype))
                .or_else(|| subtypes.get("written"))
                .or_else(|| subtypes.get("general"))
                .copied()
                .unwrap_or(self.default_years),
            None => self.default_years,
        }
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitationResult {
    pub sol_period_years: u32,
    pub accrual_date: NaiveDate,
    pub discovery_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub days_remaining: i64,
    pub is_expired: bool,
    pub is_critical: bool,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filed_timely: Option<bool>,
}

pub struct DeadlineSignals {
    pub days_remaining: i64,
    pub critical_days: i64,
    pub warning_days: i64,
}

static DEADLINE_RULES: [Rule<DeadlineSignals>; 3] = [
    Rule {
        key: "expired",
        applies: expired,
        message: "CRITICAL: The limitations period has expired. Evaluate tolling and other exceptions immediately.",
    },
    Rule {
        key: "urgent",
        applies: within_critical_window,
        message: "URGENT: The filing deadline is imminent. File the complaint immediately.",
    },
    Rule {
        key: "warning",
        applies: within_warning_window,
        message: "WARNING: The filing deadline is approaching. Finalise pleadings and prepare to file.",
    },
];

fn expired(signals: &DeadlineSignals) -> bool {
    signals.days_remaining <= 0
}

fn within_critical_window(signals: &DeadlineSignals) -> bool {
    signals.days_remaining <= signals.critical_days
}

fn within_warning_window(signals: &DeadlineSignals) -> bool {
    signals.days_remaining <= signals.warning_days
}

pub static DEADLINE_LADDER: RecommendationLadder<DeadlineSignals> = RecommendationLadder::new(
    &DEADLINE_RULES,
    "Adequate time remains before the filing deadline. Continue to monitor.",
);

#[derive(Debug, Clone, Default)]
pub struct LimitationsClock {
    config: LimitationsConfig,
}

impl LimitationsClock {
    pub fn new(config: LimitationsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LimitationsConfig {
        &self.config
    }

    /// `today` stands in for "now" and is the default accrual date.
    pub fn compute(&self, params: &LimitationParameters, today: NaiveDate) -> LimitationResult {
        let years = self.config.period_years(
            &params.claim_type,
            params.claim_subtype.as_deref(),
            &params.jurisdiction,
        );

        let accrual_date = params.accrual_date.unwrap_or(today);
        let discovery_date = params.discovery_date.unwrap_or(accrual_date);

        // Discovery rule: whichever clock runs out later controls.
        let expiration_date = add_years(accrual_date, years).max(add_years(discovery_date, years));
        let days_remaining = (expiration_date - today).num_days();

        debug!(
            claim_type = %params.claim_type,
            jurisdiction = %params.jurisdiction,
            years,
            %expiration_date,
            days_remaining,
            "computed limitations deadline"
        );

        let signals = DeadlineSignals {
            days_remaining,
            critical_days: self.config.critical_days,
            warning_days: self.config.warning_days,
        };

        LimitationResult {
            sol_period_years: years,
            accrual_date,
            discovery_date,
            expiration_date,
            days_remaining,
            is_expired: days_remaining <= 0,
            is_critical: days_remaining > 0 && days_remaining <= self.config.critical_days,
            recommendation: DEADLINE_LADDER.recommend(&signals),
            filed_timely: params.filing_date.map(|filed| filed <= expiration_date),
        }
    }
}

/// Calendar-year arithmetic; Feb 29 lands on Feb 28 in non-leap years.
fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
        .unwrap_or(NaiveDate::MAX)
}

pub fn compute_statute_of_limitations(
    params: &LimitationParameters,
    today: NaiveDate,
) -> LimitationResult {
    LimitationsClock::default().compute(params, today)
}

use chrono::NaiveDate;

use crate::analytics::{
    CaseType, Complexity, CostParameters, DamageParameters, Forum, LimitationParameters,
    ScoreFactor, ScoreFactors, SettlementParameters,
};

pub(super) const TOLERANCE: f64 = 0.01;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 6, 15)
}

pub(super) fn full_factors() -> ScoreFactors {
    ScoreFactors::new()
        .with(ScoreFactor::PrecedentSupport, 8.0)
        .with(ScoreFactor::FactualStrength, 9.0)
        .with(ScoreFactor::LegalAuthority, 7.0)
        .with(ScoreFactor::JurisdictionalFactors, 8.0)
        .with(ScoreFactor::OpposingArguments, 2.0)
        .with(ScoreFactor::EvidenceQuality, 9.0)
}

pub(super) fn contract_matter() -> CostParameters {
    CostParameters {
        case_type: CaseType::Contract,
        complexity: Complexity::Medium,
        jurisdiction: Forum::State,
        estimated_duration_months: 12.0,
        hourly_rate: 500.0,
        dispute_value: 0.0,
    }
}

pub(super) fn injury_damages() -> DamageParameters {
    DamageParameters {
        damage_type: "personal_injury".to_string(),
        economic_loss: 50_000.0,
        lost_profits: 20_000.0,
        medical_expenses: 30_000.0,
        pain_and_suffering: 40_000.0,
        punitive_multiplier: 0.0,
        interest_rate: 0.05,
        time_period_years: 2.0,
    }
}

pub(super) fn settlement_inputs() -> SettlementParameters {
    SettlementParameters {
        damage_estimate: 500_000.0,
        case_strength: 7.0,
        litigation_costs: 80_000.0,
        time_to_trial_months: 18.0,
        ..SettlementParameters::default()
    }
}

pub(super) fn claim(claim_type: &str, accrual: NaiveDate) -> LimitationParameters {
    LimitationParameters {
        claim_type: claim_type.to_string(),
        accrual_date: Some(accrual),
        ..LimitationParameters::default()
    }
}

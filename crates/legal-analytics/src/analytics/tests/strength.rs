use super::common::*;
use crate::analytics::strength::STRENGTH_LADDER;
use crate::analytics::{
    compute_case_strength, Confidence, ScoreConfig, ScoreEngine, ScoreFactor, ScoreFactors,
};

#[test]
fn empty_factors_score_zero_with_low_confidence() {
    let result = compute_case_strength(&ScoreFactors::new());

    assert_eq!(result.score, 0.0);
    assert_eq!(result.confidence, Confidence::Low);
    assert!(result.breakdown.is_empty());
    assert_eq!(STRENGTH_LADDER.classify(&result.score), "fallback");
}

#[test]
fn full_rubric_scores_high_with_inverted_opposition() {
    let result = compute_case_strength(&full_factors());

    assert_close(result.score, 8.1);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.breakdown.len(), 6);
    assert!(result.recommendation.starts_with("Strong case"));

    let opposing = &result.breakdown[&ScoreFactor::OpposingArguments];
    assert_eq!(opposing.score, 2.0);
    assert_eq!(opposing.adjusted_score, 8.0);
    assert_close(opposing.contribution, 0.8);
}

#[test]
fn partial_factors_renormalise_by_supplied_weight() {
    let factors = ScoreFactors::new()
        .with(ScoreFactor::PrecedentSupport, 6.0)
        .with(ScoreFactor::OpposingArguments, 4.0);

    let result = compute_case_strength(&factors);

    assert_close(result.score, 6.0);
    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(STRENGTH_LADDER.classify(&result.score), "moderate");
}

#[test]
fn unknown_and_out_of_range_factors_are_excluded() {
    let mut factors = ScoreFactors::new().with(ScoreFactor::LegalAuthority, 7.0);
    factors.insert("jury_appeal", 10.0);
    factors.insert("evidence_quality", 11.0);
    factors.insert("factual_strength", -1.0);

    let result = compute_case_strength(&factors);

    assert_eq!(result.breakdown.len(), 1);
    assert!(result.breakdown.contains_key(&ScoreFactor::LegalAuthority));
    assert_close(result.score, 7.0);
}

#[test]
fn three_solid_factors_give_medium_confidence() {
    let factors: ScoreFactors = [
        (ScoreFactor::PrecedentSupport, 6.0),
        (ScoreFactor::FactualStrength, 5.0),
        (ScoreFactor::EvidenceQuality, 6.0),
    ]
    .into_iter()
    .collect();

    let result = compute_case_strength(&factors);

    assert_eq!(result.confidence, Confidence::Medium);
    assert!(result.score >= 5.0 && result.score < 6.0);
}

#[test]
fn score_stays_within_bounds_across_grid() {
    let engine = ScoreEngine::new(ScoreConfig::default());
    for step in 0..=10 {
        let value = f64::from(step);
        let factors: ScoreFactors = ScoreFactor::ALL
            .into_iter()
            .map(|factor| (factor, value))
            .collect();
        let score = engine.score(&factors).score;
        assert!((0.0..=10.0).contains(&score), "score {score} out of range");
    }
}

#[test]
fn non_numeric_json_values_are_dropped_on_decode() {
    let factors: ScoreFactors = serde_json::from_value(serde_json::json!({
        "precedent_support": 9,
        "factual_strength": "strong",
        "legal_authority": null
    }))
    .expect("factors decode");

    assert_eq!(factors.len(), 1);
    let result = compute_case_strength(&factors);
    assert_close(result.score, 9.0);
}

#[test]
fn breakdown_serialises_with_factor_names() {
    let result = compute_case_strength(&ScoreFactors::new().with(ScoreFactor::FactualStrength, 5.0));
    let json = serde_json::to_value(&result).expect("serialise");

    assert_eq!(json["breakdown"]["factual_strength"]["adjustedScore"], 5.0);
    assert_eq!(json["confidence"], "low");
}

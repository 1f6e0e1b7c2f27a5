use super::common::*;
use crate::analytics::clause::{ClauseSignals, TermWeight, CLAUSE_LADDER};
use crate::analytics::{
    evaluate_clause_strength, identify_red_flags, overall_document_score, ClauseConfig,
    ClauseParameters, ClauseReviewer, ClauseRisk, DocumentReviewParameters, ReviewScores,
};

fn clause(text: &str) -> ClauseParameters {
    ClauseParameters {
        clause_text: text.to_string(),
        clause_type: "termination".to_string(),
    }
}

#[test]
fn plain_clause_keeps_the_neutral_score() {
    let result = evaluate_clause_strength(&clause("Either party may end this Agreement."));

    assert_eq!(result.strength_score, 6.0);
    assert!(result.strengths.is_empty());
    assert!(result.weaknesses.is_empty());
    assert_eq!(result.risk_level, ClauseRisk::Low);
    assert_eq!(result.clause_type, "termination");
    assert!(result.recommendation.contains("standard language"));
}

#[test]
fn protective_terms_raise_the_score() {
    let result = evaluate_clause_strength(&clause(
        "Either party may terminate upon Written Notice if the other commits a material breach \
         and fails to cure it within the cure period; consent shall not be unreasonably withheld.",
    ));

    assert_close(result.strength_score, 7.0);
    assert_eq!(
        result.strengths,
        ["reasonable", "material", "written notice", "cure period"]
    );
    assert_eq!(result.risk_level, ClauseRisk::Medium);
    assert!(result.recommendation.contains("thresholds"));
}

#[test]
fn one_sided_terms_lower_the_score_and_raise_flags() {
    let result = evaluate_clause_strength(&clause(
        "Licensor may change fees in its sole discretion. Licensee bears unlimited liability, \
         agrees to waive all claims, and takes the software as is.",
    ));

    assert_close(result.strength_score, 4.6);
    assert_eq!(
        result.weaknesses,
        ["sole discretion", "unlimited", "waive", "as is"]
    );
    assert_eq!(result.risk_level, ClauseRisk::High);
    assert_eq!(
        result.red_flags,
        [
            "Contains unlimited liability clause",
            "Contains sole discretion clause"
        ]
    );
}

#[test]
fn repeated_terms_count_once() {
    let once = evaluate_clause_strength(&clause("mutual consent"));
    let twice = evaluate_clause_strength(&clause("mutual consent and mutual release"));

    assert_eq!(once.strength_score, twice.strength_score);
}

#[test]
fn score_is_clamped_to_the_scale() {
    let reviewer = ClauseReviewer::new(ClauseConfig {
        weakness_terms: vec![TermWeight {
            term: "waive".to_string(),
            weight: -9.0,
        }],
        ..ClauseConfig::default()
    });

    let result = reviewer.evaluate(&clause("Tenant agrees to waive notice."));

    assert_eq!(result.strength_score, 1.0);
}

#[test]
fn open_ended_exposure_outranks_qualified_language() {
    let signals = ClauseSignals {
        one_sided: true,
        qualified: true,
    };
    assert_eq!(CLAUSE_LADDER.classify(&signals), "one_sided");

    let result = evaluate_clause_strength(&clause(
        "Supplier carries unlimited liability for any material breach.",
    ));
    assert_eq!(result.risk_level, ClauseRisk::High);
}

#[test]
fn overall_score_weights_present_sections_only() {
    let full = ReviewScores {
        compliance: Some(8.0),
        risk: Some(6.0),
        enforceability: Some(7.0),
        legal: Some(9.0),
    };
    assert_close(overall_document_score(&full), 7.4);

    let partial = ReviewScores {
        compliance: Some(8.0),
        legal: Some(5.0),
        ..ReviewScores::default()
    };
    assert_close(overall_document_score(&partial), 6.8);

    assert_eq!(overall_document_score(&ReviewScores::default()), 6.0);
}

#[test]
fn red_flags_follow_table_order_regardless_of_case() {
    let flags = identify_red_flags("This guarantee is IRREVOCABLE and Perpetual.");

    assert_eq!(
        flags,
        ["Contains perpetual clause", "Contains irrevocable clause"]
    );
    assert!(identify_red_flags("Payment due in thirty days.").is_empty());
}

#[test]
fn document_review_combines_score_and_flags() {
    let review = ClauseReviewer::default().review_document(&DocumentReviewParameters {
        scores: ReviewScores {
            risk: Some(4.0),
            ..ReviewScores::default()
        },
        document_text: "Borrower provides a personal guarantee and liquidated damages apply."
            .to_string(),
    });

    assert_close(review.overall_score, 4.0);
    assert_eq!(
        review.red_flags,
        [
            "Contains personal guarantee clause",
            "Contains liquidated damages clause"
        ]
    );
}

use crate::cli::CiteCommand;
use crate::infra::today_or_local;
use chrono::NaiveDate;
use clap::Args;
use legal_analytics::analytics::{
    find_analogies, AnalogyParameters, AnalyticsEngine, CaseType, ClauseParameters, Complexity,
    CostParameters, DamageParameters, Forum, LimitationParameters, PrecedentCandidate,
    RiskTolerance, ScoreFactor, ScoreFactors, SettlementParameters,
};
use legal_analytics::citations::{CaseCitation, ConstitutionCitation, StatuteCitation};
use legal_analytics::{
    extract_authorities, format_multiple_citations, generate_short_form, parse_citation,
    validate_citation, AnalyticsConfig, AppError, Citation, CitationKind, CitationStyle,
};
use serde::Serialize;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the limitations clock (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Accrual date of the sample claim (defaults to 22 months before today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) accrual_date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct CiteArgs {
    /// Citation type: case, statute, constitution, journal, book, or regulation
    #[arg(long, value_parser = crate::infra::parse_kind)]
    pub(crate) kind: CitationKind,
    /// Citation text
    pub(crate) text: String,
}

const SAMPLE_MEMO: &str = "Plaintiff relies on McDonnell v. Green and Reeves v. Sanderson \
    for the burden-shifting framework, and pleads retaliation under 42 U.S.C. § 2000 \
    and the implementing rules at 29 C.F.R. § 1604.";

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = today_or_local(args.today);
    let accrual_date = args
        .accrual_date
        .or_else(|| today.checked_sub_months(chrono::Months::new(22)))
        .unwrap_or(today);
    let engine = AnalyticsEngine::new(AnalyticsConfig::default());

    println!("Legal analytics demo");
    println!("Sample matter: wrongful termination, federal forum, evaluated {today}");

    let factors: ScoreFactors = [
        (ScoreFactor::PrecedentSupport, 7.5),
        (ScoreFactor::FactualStrength, 8.0),
        (ScoreFactor::LegalAuthority, 7.0),
        (ScoreFactor::JurisdictionalFactors, 6.5),
        (ScoreFactor::OpposingArguments, 4.0),
        (ScoreFactor::EvidenceQuality, 7.0),
    ]
    .into_iter()
    .collect();
    let strength = engine.case_strength(&factors);
    print_section("Case strength", &strength);

    let costs = engine.litigation_costs(&CostParameters {
        case_type: CaseType::Employment,
        complexity: Complexity::Medium,
        jurisdiction: Forum::Federal,
        estimated_duration_months: 18.0,
        hourly_rate: 375.0,
        dispute_value: 850_000.0,
    });
    print_section("Litigation costs", &costs);

    let damages = engine.damages(&DamageParameters {
        damage_type: "employment".to_string(),
        economic_loss: 240_000.0,
        lost_profits: 0.0,
        medical_expenses: 12_500.0,
        pain_and_suffering: 90_000.0,
        punitive_multiplier: 0.5,
        interest_rate: 0.05,
        time_period_years: 2.0,
    });
    print_section("Damages", &damages);

    let settlement = engine.settlement_range(&SettlementParameters {
        damage_estimate: damages.total_damages,
        case_strength: strength.score,
        litigation_costs: costs.total_estimated_cost,
        time_to_trial_months: 18.0,
        risk_tolerance: RiskTolerance::Medium,
    });
    print_section("Settlement range", &settlement);

    let limitations = engine.statute_of_limitations(
        &LimitationParameters {
            claim_type: "employment".to_string(),
            claim_subtype: Some("discrimination".to_string()),
            jurisdiction: "Federal".to_string(),
            accrual_date: Some(accrual_date),
            ..LimitationParameters::default()
        },
        today,
    );
    print_section("Statute of limitations", &limitations);

    let analogies = find_analogies(&AnalogyParameters {
        target_facts: "Employee terminated two weeks after filing a discrimination complaint \
                       with human resources"
            .to_string(),
        candidates: vec![
            PrecedentCandidate {
                case_name: "Burlington v. White".to_string(),
                holding: "Retaliation covers employer actions that would dissuade a reasonable \
                          worker from filing a discrimination complaint"
                    .to_string(),
                legal_issues: "retaliation employee complaint".to_string(),
            },
            PrecedentCandidate {
                case_name: "Clark County v. Breeden".to_string(),
                holding: "Temporal proximity must be very close to establish causation".to_string(),
                legal_issues: "causation timing complaint".to_string(),
            },
        ],
    });
    print_section("Factual analogies", &analogies);

    let separation_clause = engine.clause_strength(&ClauseParameters {
        clause_text: "Employee agrees to waive all claims arising from employment, and the \
                      Company may amend this release in its sole discretion."
            .to_string(),
        clause_type: "release".to_string(),
    });
    print_section("Separation agreement release", &separation_clause);

    let citations = vec![
        Citation::Case(CaseCitation {
            case_name: Some("Burlington N. & Santa Fe Ry. Co. v. White".to_string()),
            volume: Some("548".to_string()),
            reporter: Some("U.S.".to_string()),
            page: Some("53".to_string()),
            court: Some("U.S.".to_string()),
            year: Some("2006".to_string()),
        }),
        Citation::Statute(StatuteCitation {
            title: Some("42".to_string()),
            code_section: Some("2000e-3".to_string()),
            jurisdiction: Some("Federal".to_string()),
            year: Some("2018".to_string()),
            ..StatuteCitation::default()
        }),
        Citation::Constitution(ConstitutionCitation {
            amendment: Some("XIV".to_string()),
            section: Some("1".to_string()),
            ..ConstitutionCitation::default()
        }),
    ];
    let formatted = format_multiple_citations(&citations, CitationStyle::Bluebook);
    println!("\nCitation string\n{formatted}");

    print_section("Authorities in memo", &extract_authorities(SAMPLE_MEMO));
    Ok(())
}

pub(crate) fn run_cite(command: CiteCommand) -> Result<(), AppError> {
    match command {
        CiteCommand::Parse(args) => print_json(&parse_citation(&args.text, args.kind)),
        CiteCommand::Validate(args) => print_json(&validate_citation(&args.text, args.kind)),
        CiteCommand::ShortForm(args) => {
            println!("{}", generate_short_form(&args.text, args.kind));
            Ok(())
        }
    }
}

fn print_section<T: Serialize>(title: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("\n{title}\n{json}"),
        Err(err) => println!("\n{title} unavailable: {err}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

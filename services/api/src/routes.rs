use crate::infra::{today_or_local, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use legal_analytics::analytics::{
    find_analogies, AnalogyParameters, AnalogyResult, AnalyticsEngine, ClauseAssessment,
    ClauseParameters, CostParameters, CostResult, DamageParameters, DamageResult,
    DocumentReview, DocumentReviewParameters, LimitationParameters, LimitationResult,
    ScoreFactors, ScoreResult, SettlementParameters, SettlementResult,
};
use legal_analytics::boundary::{
    decode_each, decode_params, deserialize_optional_date, require_text,
};
use legal_analytics::citations::{CitationValidation, ExtractedAuthorities, ParsedCitation};
use legal_analytics::{
    extract_authorities, format_citation, format_multiple_citations, generate_short_form,
    parse_citation, validate_citation, AnalyticsError, AppError, Citation, CitationKind,
    CitationStyle,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

type Engine = Arc<AnalyticsEngine>;

static MISSING: Value = Value::Null;

#[derive(Debug, Deserialize)]
pub(crate) struct LimitationsRequest {
    #[serde(flatten)]
    pub(crate) params: LimitationParameters,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FormatMultipleRequest {
    pub(crate) citations: Vec<Value>,
    #[serde(default)]
    pub(crate) style: CitationStyle,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormattedCitation {
    pub(crate) citation: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortFormResponse {
    pub(crate) original: String,
    pub(crate) short_form: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtractResponse {
    #[serde(flatten)]
    pub(crate) authorities: ExtractedAuthorities,
    pub(crate) all: Vec<String>,
}

/// Every engine endpoint, bound to a shared engine instance.
pub(crate) fn analytics_router(engine: Engine) -> Router {
    Router::new()
        .route("/api/v1/analytics/case-strength", post(case_strength_endpoint))
        .route(
            "/api/v1/analytics/litigation-costs",
            post(litigation_costs_endpoint),
        )
        .route("/api/v1/analytics/damages", post(damages_endpoint))
        .route(
            "/api/v1/analytics/settlement-range",
            post(settlement_range_endpoint),
        )
        .route(
            "/api/v1/analytics/statute-of-limitations",
            post(limitations_endpoint),
        )
        .route("/api/v1/analytics/analogies", post(analogies_endpoint))
        .route(
            "/api/v1/analytics/clause-strength",
            post(clause_strength_endpoint),
        )
        .route(
            "/api/v1/analytics/document-review",
            post(document_review_endpoint),
        )
        .route("/api/v1/citations/format", post(format_endpoint))
        .route(
            "/api/v1/citations/format-multiple",
            post(format_multiple_endpoint),
        )
        .route("/api/v1/citations/parse", post(parse_endpoint))
        .route("/api/v1/citations/short-form", post(short_form_endpoint))
        .route("/api/v1/citations/validate", post(validate_endpoint))
        .route("/api/v1/citations/extract", post(extract_endpoint))
        .with_state(engine)
}

pub(crate) fn with_service_routes(engine: Engine) -> Router {
    analytics_router(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn case_strength_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<ScoreResult>, AppError> {
    let factors: ScoreFactors = decode_params(payload)?;
    Ok(Json(engine.case_strength(&factors)))
}

pub(crate) async fn litigation_costs_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<CostResult>, AppError> {
    let params: CostParameters = decode_params(payload)?;
    Ok(Json(engine.litigation_costs(&params)))
}

pub(crate) async fn damages_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<DamageResult>, AppError> {
    let params: DamageParameters = decode_params(payload)?;
    Ok(Json(engine.damages(&params)))
}

pub(crate) async fn settlement_range_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<SettlementResult>, AppError> {
    let params: SettlementParameters = decode_params(payload)?;
    Ok(Json(engine.settlement_range(&params)))
}

pub(crate) async fn limitations_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<LimitationResult>, AppError> {
    let LimitationsRequest { params, today } = decode_params(payload)?;
    Ok(Json(
        engine.statute_of_limitations(&params, today_or_local(today)),
    ))
}

pub(crate) async fn analogies_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<AnalogyResult>, AppError> {
    let params: AnalogyParameters = decode_params(payload)?;
    Ok(Json(find_analogies(&params)))
}

pub(crate) async fn clause_strength_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<ClauseAssessment>, AppError> {
    let params: ClauseParameters = decode_params(payload)?;
    Ok(Json(engine.clause_strength(&params)))
}

pub(crate) async fn document_review_endpoint(
    State(engine): State<Engine>,
    Json(payload): Json<Value>,
) -> Result<Json<DocumentReview>, AppError> {
    let params: DocumentReviewParameters = decode_params(payload)?;
    Ok(Json(engine.document_review(&params)))
}

pub(crate) async fn format_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<FormattedCitation>, AppError> {
    let citation: Citation = decode_params(payload)?;
    Ok(Json(FormattedCitation {
        citation: format_citation(&citation),
    }))
}

pub(crate) async fn format_multiple_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<FormattedCitation>, AppError> {
    let request: FormatMultipleRequest = decode_params(payload)?;
    let citations: Vec<Citation> = decode_each(request.citations);
    Ok(Json(FormattedCitation {
        citation: format_multiple_citations(&citations, request.style),
    }))
}

pub(crate) async fn parse_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<ParsedCitation>, AppError> {
    let (text, kind) = citation_arguments(&payload)?;
    Ok(Json(parse_citation(text, kind)))
}

pub(crate) async fn short_form_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<ShortFormResponse>, AppError> {
    let (text, kind) = citation_arguments(&payload)?;
    Ok(Json(ShortFormResponse {
        original: text.to_string(),
        short_form: generate_short_form(text, kind),
    }))
}

pub(crate) async fn validate_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<CitationValidation>, AppError> {
    let (text, kind) = citation_arguments(&payload)?;
    Ok(Json(validate_citation(text, kind)))
}

pub(crate) async fn extract_endpoint(
    Json(payload): Json<Value>,
) -> Result<Json<ExtractResponse>, AppError> {
    let text = require_text(object_field(&payload, "text")?, "text")?;
    let authorities = extract_authorities(text);
    Ok(Json(ExtractResponse {
        all: authorities.all(),
        authorities,
    }))
}

/// `{"text": ..., "type": ...}` bodies shared by the parse, short-form and validate endpoints.
fn citation_arguments(payload: &Value) -> Result<(&str, CitationKind), AnalyticsError> {
    let text = require_text(object_field(payload, "text")?, "text")?;
    let kind = require_text(object_field(payload, "type")?, "type")?
        .parse::<CitationKind>()
        .map_err(AnalyticsError::from)?;
    Ok((text, kind))
}

fn object_field<'a>(payload: &'a Value, field: &str) -> Result<&'a Value, AnalyticsError> {
    let object = payload.as_object().ok_or_else(|| {
        AnalyticsError::InvalidArgument("expected a JSON object request body".to_string())
    })?;
    Ok(object.get(field).unwrap_or(&MISSING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app() -> Router {
        with_service_routes(Arc::new(AnalyticsEngine::default()))
    }

    async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");

        let response = app().oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body readable");
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body readable");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        let response = app()
            .layer(Extension(state))
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn litigation_costs_endpoint_matches_reference_estimate() {
        let (status, body) = post_json(
            "/api/v1/analytics/litigation-costs",
            json!({
                "caseType": "contract",
                "complexity": "medium",
                "jurisdiction": "state",
                "estimatedDurationMonths": 12,
                "hourlyRate": 500,
                "disputeValue": 0
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["breakdown"]["attorney_fees"], 60000.0);
        assert_eq!(body["breakdown"]["court_fees"], 800.0);
        assert_eq!(body["cost_benefit_ratio"], 0.0);
    }

    #[tokio::test]
    async fn non_object_body_is_bad_request() {
        let (status, body) = post_json("/api/v1/analytics/damages", json!([1, 2])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .starts_with("invalid argument"));
    }

    #[tokio::test]
    async fn limitations_endpoint_honours_pinned_today() {
        let (status, body) = post_json(
            "/api/v1/analytics/statute-of-limitations",
            json!({
                "claimType": "personal_injury",
                "accrualDate": "2023-07-05",
                "filingDate": "2025-07-01",
                "today": "2025-06-15"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["expiration_date"], "2025-07-05");
        assert_eq!(body["days_remaining"], 20);
        assert_eq!(body["is_critical"], true);
        assert_eq!(body["filed_timely"], true);
    }

    #[tokio::test]
    async fn clause_strength_endpoint_scores_one_sided_language() {
        let (status, body) = post_json(
            "/api/v1/analytics/clause-strength",
            json!({
                "clauseText": "Vendor may suspend service in its sole discretion.",
                "clauseType": "suspension"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["clause_type"], "suspension");
        assert_eq!(body["strength_score"], 5.6);
        assert_eq!(body["risk_level"], "high");
        assert_eq!(body["red_flags"][0], "Contains sole discretion clause");
    }

    #[tokio::test]
    async fn document_review_endpoint_defaults_to_neutral_score() {
        let (status, body) = post_json(
            "/api/v1/analytics/document-review",
            json!({ "documentText": "The license is perpetual." }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overall_score"], 6.0);
        assert_eq!(body["red_flags"], json!(["Contains perpetual clause"]));
    }

    #[tokio::test]
    async fn format_endpoint_renders_federal_statute() {
        let (status, body) = post_json(
            "/api/v1/citations/format",
            json!({
                "type": "statute",
                "title": 15,
                "code_section": "1601",
                "jurisdiction": "Federal",
                "year": "1968"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["citation"], "15 U.S.C. § 1601 (1968)");
    }

    #[tokio::test]
    async fn format_multiple_drops_unknown_types_and_reads_articles() {
        let (status, body) = post_json(
            "/api/v1/citations/format-multiple",
            json!({
                "citations": [
                    { "type": "treaty", "title": "Geneva Convention" },
                    {
                        "type": "article",
                        "title": "The Path of the Law",
                        "volume": "10",
                        "journal": "Harv. L. Rev.",
                        "page": "457",
                        "year": "1897"
                    },
                    { "type": "constitution", "amendment": "I" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["citation"],
            "The Path of the Law, 10 Harv. L. Rev. 457 (1897); U.S. Const. amend. I"
        );
    }

    #[tokio::test]
    async fn parse_endpoint_requires_string_text() {
        let (status, _) = post_json(
            "/api/v1/citations/parse",
            json!({ "text": 42, "type": "case" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_json(
            "/api/v1/citations/parse",
            json!({ "text": "Roe v. Wade, 410 U.S. 113 (U.S. 1973)", "type": "case" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "case");
        assert_eq!(body["components"]["volume"], "410");
    }

    #[tokio::test]
    async fn validate_endpoint_reports_missing_tokens() {
        let (status, body) = post_json(
            "/api/v1/citations/validate",
            json!({ "text": "Roe and Wade", "type": "case" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn extract_endpoint_lists_authorities() {
        let (status, body) = post_json(
            "/api/v1/citations/extract",
            json!({ "text": "See Monell v. Department and 42 U.S.C. § 1983." }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cases"][0], "Monell v. Department");
        assert_eq!(body["statutes"][0], "42 U.S.C. § 1983");
        assert_eq!(body["all"].as_array().map(Vec::len), Some(2));
    }
}

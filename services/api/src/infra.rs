use chrono::{Local, NaiveDate};
use legal_analytics::boundary;
use legal_analytics::citations::UnknownCitationKind;
use legal_analytics::CitationKind;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Requests may pin the evaluation date; otherwise the local calendar day is used.
pub(crate) fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    boundary::parse_date(raw)
}

pub(crate) fn parse_kind(raw: &str) -> Result<CitationKind, UnknownCitationKind> {
    raw.parse()
}

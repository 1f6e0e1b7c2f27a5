use crate::config::{LogFormat, TelemetryConfig};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter `{value}`")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("cannot install tracing subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Pick the directive string: a non-blank `RUST_LOG` beats the configured level.
pub fn build_filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = rust_log
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(log_level);

    EnvFilter::try_new(directives).map_err(|source| TelemetryError::Filter {
        value: directives.to_string(),
        source,
    })
}

/// Install the global subscriber in the layout chosen for the environment.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), &config.log_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().with_target(true).with_ansi(true).try_init(),
        LogFormat::Plain => builder.compact().with_target(false).with_ansi(false).try_init(),
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .try_init(),
    };

    installed.map_err(TelemetryError::Subscriber)
}

use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::analytics::AnalyticsConfig;

/// Stage the service runs in. Drives the default log level and output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Test => "warn",
            Self::Production => "info",
        }
    }
}

/// Top-level configuration for the analytics service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    /// Lookup tables and coefficients handed to every calculator.
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Read the process environment (after `.env`). `APP_ANALYTICS_CONFIG` may
    /// name a JSON file whose sections replace the built-in tables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_label(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            Err(_) => 3000,
        };

        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::from_label(&raw)?,
            Err(_) => LogFormat::for_environment(environment),
        };

        let analytics = match env::var_os("APP_ANALYTICS_CONFIG") {
            Some(path) if !path.is_empty() => load_analytics_tables(Path::new(&path))?,
            _ => AnalyticsConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            analytics,
        })
    }
}

/// Parse an analytics table file. Sections and fields it leaves out keep their defaults.
pub fn load_analytics_tables(path: &Path) -> Result<AnalyticsConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::AnalyticsFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::AnalyticsTables {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
            host: self.host.clone(),
            source,
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Line layout for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human output with targets and colour.
    Compact,
    /// Single-line human output without colour, for captured test and CI logs.
    Plain,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub fn for_environment(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Development => Self::Compact,
            AppEnvironment::Test => Self::Plain,
            AppEnvironment::Production => Self::Json,
        }
    }

    fn from_label(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST `{host}` must be `localhost` or an IPv4/IPv6 address")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("APP_LOG_FORMAT `{0}` is not one of compact, plain, json")]
    InvalidLogFormat(String),
    #[error("cannot read analytics tables from {}", path.display())]
    AnalyticsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("analytics tables in {} are malformed", path.display())]
    AnalyticsTables {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_ANALYTICS_CONFIG",
        ] {
            env::remove_var(key);
        }
    }

    fn write_tables(name: &str, contents: &str) -> PathBuf {
        let file = format!("legal-analytics-{}-{name}.json", std::process::id());
        let path = env::temp_dir().join(file);
        fs::write(&path, contents).expect("temp file writable");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn production_logs_json_at_info() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }

    #[test]
    fn explicit_log_settings_override_environment_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_LOG_LEVEL", "legal_analytics=trace");
        env::set_var("APP_LOG_FORMAT", "Plain");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(config.telemetry.log_level, "legal_analytics=trace");
        assert_eq!(config.telemetry.format, LogFormat::Plain);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOG_FORMAT", "xml");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidLogFormat(value)) if value == "xml"));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn hostnames_other_than_localhost_are_rejected() {
        let server = ServerConfig {
            host: "courts.example".to_string(),
            port: 3000,
        };
        let err = server.socket_addr().expect_err("hostname is not an address");
        assert!(err.to_string().contains("courts.example"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn maps_ci_to_test_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "CI");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.telemetry.format, LogFormat::Plain);
    }

    #[test]
    fn analytics_file_overrides_only_the_fields_it_names() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = write_tables(
            "partial",
            r#"{
                "damages": { "punitive_ratio_ceiling": 4.0 },
                "limitations": { "critical_days": 45 }
            }"#,
        );
        env::set_var("APP_ANALYTICS_CONFIG", &path);
        let config = AppConfig::load().expect("config loads");
        reset_env();
        fs::remove_file(&path).ok();

        let defaults = AnalyticsConfig::default();
        assert_eq!(config.analytics.damages.punitive_ratio_ceiling, 4.0);
        assert_eq!(
            config.analytics.damages.emotional_distress_ratio,
            defaults.damages.emotional_distress_ratio
        );
        assert_eq!(config.analytics.limitations.critical_days, 45);
        assert_eq!(config.analytics.limitations.periods, defaults.limitations.periods);
        assert_eq!(config.analytics.costs, defaults.costs);
    }

    #[test]
    fn malformed_analytics_file_is_reported_with_its_path() {
        let path = write_tables("malformed", r#"{ "costs": { "federal_multiplier": "high" } }"#);
        let result = load_analytics_tables(&path);
        fs::remove_file(&path).ok();

        match result {
            Err(err @ ConfigError::AnalyticsTables { .. }) => {
                assert!(err.to_string().contains("malformed"), "{err}")
            }
            other => panic!("expected malformed tables, got {other:?}"),
        }
    }

    #[test]
    fn missing_analytics_file_is_an_error() {
        let result = load_analytics_tables(Path::new("/nonexistent/analytics.json"));
        assert!(matches!(result, Err(ConfigError::AnalyticsFile { .. })));
    }
}

use crate::assessment::{AssessmentConfig, InputPolicy};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let input_policy = match env::var("APP_INPUT_POLICY") {
            Ok(raw) => parse_input_policy(&raw)?,
            Err(_) => InputPolicy::default(),
        };
        let history_limit = match env::var("APP_HISTORY_LIMIT") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_history_limit(&raw)?),
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            assessment: AssessmentConfig {
                input_policy,
                history_limit,
            },
        })
    }
}

pub fn parse_input_policy(raw: &str) -> Result<InputPolicy, ConfigError> {
    InputPolicy::parse(raw).ok_or_else(|| ConfigError::InvalidInputPolicy(raw.to_string()))
}

pub fn parse_history_limit(raw: &str) -> Result<NonZeroUsize, ConfigError> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ConfigError::InvalidHistoryLimit(raw.to_string()))
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

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidInputPolicy(String),
    InvalidHistoryLimit(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidInputPolicy(value) => {
                write!(f, "input policy must be 'clamp' or 'reject', got '{value}'")
            }
            ConfigError::InvalidHistoryLimit(value) => {
                write!(f, "history limit must be a positive integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidInputPolicy(_)
            | ConfigError::InvalidHistoryLimit(_) => None,
        }
    }
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_INPUT_POLICY");
        env::remove_var("APP_HISTORY_LIMIT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.assessment.input_policy, InputPolicy::Clamp);
        assert!(config.assessment.history_limit.is_none());
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
    fn reads_assessment_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_INPUT_POLICY", "Reject");
        env::set_var("APP_HISTORY_LIMIT", "250");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.assessment.input_policy, InputPolicy::Reject);
        assert_eq!(
            config.assessment.history_limit.map(NonZeroUsize::get),
            Some(250)
        );
        reset_env();
    }

    #[test]
    fn rejects_zero_history_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HISTORY_LIMIT", "0");
        let err = AppConfig::load().expect_err("zero cap is invalid");
        assert!(matches!(err, ConfigError::InvalidHistoryLimit(_)));
        reset_env();
    }

    #[test]
    fn rejects_unknown_input_policy() {
        assert!(matches!(
            parse_input_policy("ignore"),
            Err(ConfigError::InvalidInputPolicy(_))
        ));
    }
}

use crate::workflows::merit::prediction::PredictionPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_LEDGER_CSV: &str = "data/mains_marks.csv";
pub const DEFAULT_STATISTICS_CSV: &str = "data/statistics_marks.csv";

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
    pub data: DataConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig::from_env()?,
        })
    }
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

/// Marks tables, vacancy catalog and prediction policy for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub ledger_csv: PathBuf,
    pub statistics_csv: Option<PathBuf>,
    /// `None` selects the built-in catalog.
    pub catalog_csv: Option<PathBuf>,
    pub prediction_policy: PredictionPolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ledger_csv: PathBuf::from(DEFAULT_LEDGER_CSV),
            statistics_csv: Some(PathBuf::from(DEFAULT_STATISTICS_CSV)),
            catalog_csv: None,
            prediction_policy: PredictionPolicy::default(),
        }
    }
}

impl DataConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let ledger_csv = non_empty_var("MERIT_LEDGER_CSV")
            .map(PathBuf::from)
            .unwrap_or(defaults.ledger_csv);
        let statistics_csv = non_empty_var("MERIT_STATISTICS_CSV")
            .map(PathBuf::from)
            .or(defaults.statistics_csv);
        let catalog_csv = non_empty_var("MERIT_CATALOG_CSV").map(PathBuf::from);

        let prediction_policy = match non_empty_var("MERIT_PREDICTION_POLICY") {
            Some(raw) => PredictionPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidPredictionPolicy { value: raw })?,
            None => defaults.prediction_policy,
        };

        Ok(Self {
            ledger_csv,
            statistics_csv,
            catalog_csv,
            prediction_policy,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPredictionPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPredictionPolicy { value } => write!(
                f,
                "MERIT_PREDICTION_POLICY must be 'all' or 'first' (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPredictionPolicy { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

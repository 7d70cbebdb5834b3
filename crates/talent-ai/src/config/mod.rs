//! Environment-driven configuration for the screening service.

use std::env;
use std::fmt;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

/// Deployment environment the service believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnvironment::Production,
            "test" => AppEnvironment::Test,
            _ => AppEnvironment::Development,
        }
    }
}

/// Top-level application configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub worker: WorkerConfig,
}

impl AppConfig {
    /// Load configuration, reading a `.env` file first when one exists.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&env_var("APP_ENV", "development"));

        let host = env_var("APP_HOST", "127.0.0.1");
        let port = env_var("APP_PORT", "8080")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env_var("APP_LOG_LEVEL", "info");

        let scan_interval_secs = env_var("APP_SCAN_INTERVAL_SECS", "30")
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidScanInterval)?;
        if scan_interval_secs == 0 {
            return Err(ConfigError::InvalidScanInterval);
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            worker: WorkerConfig { scan_interval_secs },
        })
    }
}

fn env_var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Network settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the configured host and port into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host == "localhost" {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::from((ip, self.port)))
    }
}

/// Log verbosity settings.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Cadence settings for the background evaluation worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub scan_interval_secs: u64,
}

impl WorkerConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: AddrParseError },
    InvalidScanInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => {
                write!(f, "APP_PORT must be a valid TCP port number")
            }
            ConfigError::InvalidHost { source } => {
                write!(f, "APP_HOST is not a valid IP address: {source}")
            }
            ConfigError::InvalidScanInterval => {
                write!(
                    f,
                    "APP_SCAN_INTERVAL_SECS must be a positive number of seconds"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

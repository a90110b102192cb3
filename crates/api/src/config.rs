use std::time::Duration;

use hc_upstream::{BackoffConfig, UpstreamConfig, DEFAULT_BASE_URL};

/// Deployment profile selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse a profile name; anything unrecognized is `Development`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Collection interval used when `SCRAPE_INTERVAL_SECS` is unset.
    pub fn default_scrape_interval_secs(self) -> u64 {
        match self {
            Self::Production => 300,
            Self::Development | Self::Testing => 60,
        }
    }

    pub fn default_database_url(self) -> &'static str {
        match self {
            Self::Testing => "sqlite::memory:",
            Self::Development | Self::Production => "sqlite://helldivers2.db",
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: Environment,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
    /// Inbound request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for the collector (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    /// Interval between collection cycles.
    pub scrape_interval: Duration,
    pub upstream: UpstreamConfig,
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                               |
    /// |-------------------------|---------------------------------------|
    /// | `APP_ENV`               | `development`                         |
    /// | `HOST`                  | `0.0.0.0`                             |
    /// | `PORT`                  | `5000`                                |
    /// | `CORS_ORIGINS`          | `*`                                   |
    /// | `REQUEST_TIMEOUT_SECS`  | `60`                                  |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                                  |
    /// | `DATABASE_URL`          | `sqlite://helldivers2.db`             |
    /// | `HELLDIVERS_API_BASE`   | `https://api.helldivers2.dev/api/v1`  |
    /// | `API_TIMEOUT_SECS`      | `30`                                  |
    /// | `SCRAPE_INTERVAL_SECS`  | `60` (`300` in production)            |
    /// | `REQUEST_DELAY_MS`      | `2000`                                |
    /// | `UPSTREAM_MAX_RETRIES`  | `3`                                   |
    /// | `UPSTREAM_CLIENT_NAME`  | `high-command-api`                    |
    /// | `UPSTREAM_CONTACT`      | `unknown`                             |
    /// | `LOG_LEVEL`             | `info`                                |
    /// | `LOG_FORMAT`            | `text`                                |
    ///
    /// `HELLDIVERS_API_BASE=NA` selects the default base URL. The testing
    /// profile defaults to an in-memory database.
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let environment = Environment::parse(&var("APP_ENV").unwrap_or_default());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| environment.default_database_url().into());

        let scrape_interval_secs: u64 = var("SCRAPE_INTERVAL_SECS")
            .map(|v| v.parse().expect("SCRAPE_INTERVAL_SECS must be a valid u64"))
            .unwrap_or_else(|| environment.default_scrape_interval_secs());
        assert!(scrape_interval_secs > 0, "SCRAPE_INTERVAL_SECS must be positive");

        let base_url = var("HELLDIVERS_API_BASE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "NA")
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let api_timeout_secs: u64 = var("API_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("API_TIMEOUT_SECS must be a valid u64");

        let request_delay_ms: u64 = var("REQUEST_DELAY_MS")
            .unwrap_or_else(|| "2000".into())
            .parse()
            .expect("REQUEST_DELAY_MS must be a valid u64");

        let max_retries: u32 = var("UPSTREAM_MAX_RETRIES")
            .unwrap_or_else(|| "3".into())
            .parse()
            .expect("UPSTREAM_MAX_RETRIES must be a valid u32");

        let upstream = UpstreamConfig {
            base_url,
            timeout: Duration::from_secs(api_timeout_secs),
            request_delay: Duration::from_millis(request_delay_ms),
            backoff: BackoffConfig {
                max_retries,
                ..Default::default()
            },
            client_name: var("UPSTREAM_CLIENT_NAME").unwrap_or_else(|| "high-command-api".into()),
            contact: var("UPSTREAM_CONTACT").unwrap_or_else(|| "unknown".into()),
        };

        let log_level = var("LOG_LEVEL")
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_else(|| "info".into());

        let log_format = match var("LOG_FORMAT").as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            environment,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            scrape_interval: Duration::from_secs(scrape_interval_secs),
            upstream,
            log_level,
            log_format,
        }
    }
}

//! Application configuration
//!
//! Loaded from environment variables (and a `.env` file when present).

use std::env;
use std::str::FromStr;

/// `DATABASE_URL` value that selects the in-process store
pub const MEMORY_DATABASE_URL: &str = "memory";

const MIN_JWT_SECRET_LEN: usize = 32;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub snowflake: SnowflakeConfig,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Whether the in-process store was requested instead of PostgreSQL
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.eq_ignore_ascii_case(MEMORY_DATABASE_URL)
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access-token lifetime in seconds
    pub expiry_secs: i64,
}

/// Per-IP rate limiting; `requests_per_second == 0` disables it
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

impl RateLimitConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.requests_per_second > 0 && self.burst > 0
    }
}

#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

fn default_app_name() -> String {
    "community-server".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_jwt_expiry() -> i64 {
    86_400 // 1 day
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_or = |key: &'static str, default: fn() -> u32| -> Result<u32, ConfigError> {
            parse_var(&lookup, key).map(|v| v.unwrap_or_else(default))
        };

        let secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                format!("must be at least {MIN_JWT_SECRET_LEN} characters"),
            ));
        }

        let worker_id: u16 = parse_var(&lookup, "SNOWFLAKE_WORKER_ID")?.unwrap_or(0);
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "SNOWFLAKE_WORKER_ID",
                worker_id.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .map(|s| s.parse::<Environment>())
                    .transpose()?
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "SERVER_PORT")?.unwrap_or_else(default_port),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            jwt: JwtConfig {
                secret,
                expiry_secs: parse_var(&lookup, "JWT_EXPIRY")?.unwrap_or_else(default_jwt_expiry),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or("RATE_LIMIT_PER_SECOND", default_requests_per_second)?,
                burst: parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            snowflake: SnowflakeConfig { worker_id },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
        })
        .transpose()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

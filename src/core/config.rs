use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::shared::constants::{DEFAULT_ACTIVITY_LOG_PATH, DEFAULT_COP_PER_USD, DEFAULT_TARGET_CURRENCY};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub exchange_rate: ExchangeRateConfig,
    pub activity_log: ActivityLogConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Which catalog store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is `Postgres`
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Exchange rate cache and rate source settings
#[derive(Debug, Clone)]
pub struct ExchangeRateConfig {
    /// Currency prices are converted into (source currency is always USD)
    pub target_currency: String,
    /// Value reported by the fixed rate source
    pub source_value: Decimal,
    /// Rate handed out when a refresh fails
    pub fallback_rate: Decimal,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ActivityLogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            exchange_rate: ExchangeRateConfig::from_env()?,
            activity_log: ActivityLogConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let backend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse::<StoreBackend>()?;

        let url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if backend == StoreBackend::Postgres && url.is_none() {
            return Err("DATABASE_URL must be set when STORE_BACKEND=postgres".to_string());
        }

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            backend,
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl ExchangeRateConfig {
    const DEFAULT_CACHE_TTL_SECS: u64 = 1800; // 30 minutes
    const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let target_currency = env::var("EXCHANGE_RATE_TARGET_CURRENCY")
            .unwrap_or_else(|_| DEFAULT_TARGET_CURRENCY.to_string())
            .to_ascii_uppercase();

        let source_value = env::var("EXCHANGE_RATE_SOURCE_VALUE")
            .ok()
            .map(|v| Decimal::from_str(v.trim()))
            .transpose()
            .map_err(|_| "EXCHANGE_RATE_SOURCE_VALUE must be a valid decimal".to_string())?
            .unwrap_or_else(|| Decimal::from(DEFAULT_COP_PER_USD));

        let fallback_rate = env::var("EXCHANGE_RATE_FALLBACK")
            .ok()
            .map(|v| Decimal::from_str(v.trim()))
            .transpose()
            .map_err(|_| "EXCHANGE_RATE_FALLBACK must be a valid decimal".to_string())?
            .unwrap_or_else(|| Decimal::from(DEFAULT_COP_PER_USD));

        let cache_ttl_secs = env::var("EXCHANGE_RATE_CACHE_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "EXCHANGE_RATE_CACHE_TTL_SECS must be a valid number".to_string())?;

        let fetch_timeout_secs = env::var("EXCHANGE_RATE_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_FETCH_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "EXCHANGE_RATE_FETCH_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            target_currency,
            source_value,
            fallback_rate,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            target_currency: DEFAULT_TARGET_CURRENCY.to_string(),
            source_value: Decimal::from(DEFAULT_COP_PER_USD),
            fallback_rate: Decimal::from(DEFAULT_COP_PER_USD),
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_SECS),
            fetch_timeout: Duration::from_secs(Self::DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl ActivityLogConfig {
    pub fn from_env() -> Result<Self, String> {
        let path = env::var("ACTIVITY_LOG_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACTIVITY_LOG_PATH.to_string());

        Ok(Self {
            path: PathBuf::from(path),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Movie Catalog API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the movie catalog".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("postgres".parse::<StoreBackend>(), Ok(StoreBackend::Postgres));
        assert_eq!("Memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_exchange_rate_defaults() {
        let config = ExchangeRateConfig::default();
        assert_eq!(config.target_currency, "COP");
        assert_eq!(config.fallback_rate, Decimal::from(3683));
        assert_eq!(config.cache_ttl, Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_swagger_credentials() {
        let mut config = SwaggerConfig {
            username: Some("docs".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(config.credentials(), None);

        config.password = Some("secret".to_string());
        assert_eq!(config.credentials(), Some("docs:secret".to_string()));
    }
}

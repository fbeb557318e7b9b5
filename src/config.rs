/*
 * Responsibility
 * - load settings from environment variables (DATABASE_URL, External Authority, proxy, timeouts)
 * - validate them (missing required values fail startup)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // None -> in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub authority: AuthorityConfig,

    pub request_timeout: Duration,
}

/// Where and how to reach the External Authority.
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    pub base_url: Url,
    pub check_path: String,
    pub proxy: Option<String>,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        let database_url = var("DATABASE_URL");

        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let base_url = var("AUTH_AUTHORITY_URL")
            .ok_or(ConfigError::Missing("AUTH_AUTHORITY_URL"))?;
        let base_url =
            Url::parse(&base_url).map_err(|_| ConfigError::Invalid("AUTH_AUTHORITY_URL"))?;

        let check_path = var("AUTH_CHECK_PATH").unwrap_or_else(|| "check_token".to_string());

        let proxy = var("HTTP_PROXY");
        if let Some(p) = &proxy {
            Url::parse(p).map_err(|_| ConfigError::Invalid("HTTP_PROXY"))?;
        }

        let auth_check_timeout_seconds = var("AUTH_CHECK_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);

        let request_timeout_seconds = var("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        // the request timeout must outlive an authority check, otherwise a slow
        // authority surfaces as 408 instead of 401
        if request_timeout_seconds <= auth_check_timeout_seconds {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            authority: AuthorityConfig {
                base_url,
                check_path,
                proxy,
                timeout: Duration::from_secs(auth_check_timeout_seconds),
            },
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}

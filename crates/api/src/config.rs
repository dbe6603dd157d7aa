use std::str::FromStr;

/// Error raised when an environment variable is missing or unparsable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `20`).
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `DATABASE_URL`         | (required)                                    |
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `5000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `DB_MAX_CONNECTIONS`   | `20`                                          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a closure over a fixed map so
    /// they never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 5000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?;

        Ok(Self {
            database_url,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
}

/// Which relational engine the process talks to. Chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// Single-process, file-backed engine used in development.
    Embedded { path: PathBuf },
    /// Client/server engine reached through a connection pool.
    Enterprise(EnterpriseConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseConfig {
    /// Full connection URL. Takes precedence over the discrete fields when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub pool_size: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let use_embedded = match lookup("USE_EMBEDDED_DB") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("USE_EMBEDDED_DB must be a boolean, got '{}'", raw))?,
            None => true,
        };

        let database = if use_embedded {
            DatabaseConfig::Embedded {
                path: lookup("EMBEDDED_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data/catalog.db")),
            }
        } else {
            DatabaseConfig::Enterprise(EnterpriseConfig {
                url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: lookup("DB_PORT")
                    .unwrap_or_else(|| "5432".to_string())
                    .parse()
                    .context("DB_PORT must be a valid number")?,
                database: lookup("DB_NAME").unwrap_or_else(|| "catalog".to_string()),
                user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                pool_size: lookup("DB_POOL_SIZE")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .context("DB_POOL_SIZE must be a positive number")?,
            })
        };

        if let DatabaseConfig::Enterprise(enterprise) = &database {
            anyhow::ensure!(enterprise.pool_size > 0, "DB_POOL_SIZE must be at least 1");
        }

        Ok(Self { port, database })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

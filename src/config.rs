use std::env;
use std::str::FromStr;

use crate::auth::password::DEFAULT_HASH_COST;
use crate::error::AppError;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = value("JWT_SECRET")
            .ok_or_else(|| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        let bcrypt_cost = parse_or(value("BCRYPT_COST"), "BCRYPT_COST", DEFAULT_HASH_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::InternalServerError(
                "BCRYPT_COST must be between 4 and 31".into(),
            ));
        }

        let cors_origins = value("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url: value("DATABASE_URL"),
            database_max_connections: parse_or(
                value("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                5,
            )?,
            jwt_secret,
            server_host: value("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: parse_or(value("SERVER_PORT"), "SERVER_PORT", DEFAULT_PORT)?,
            bcrypt_cost,
            cors_origins,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number", key))),
        None => Ok(default),
    }
}

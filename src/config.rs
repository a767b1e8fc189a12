use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name reported by `/health`.
    pub service_name: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    /// Empty means any origin is accepted.
    pub allowed_origins: Vec<String>,
    /// Answer a failed login with `200 {"result": "No user found"}` instead of a 401.
    pub legacy_login_failure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let service_name = get("SERVICE_NAME").unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => 5002,
        };

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(value) => match value.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => return Err(ConfigError::Invalid { key: "BCRYPT_COST", value }),
            },
            None => bcrypt::DEFAULT_COST,
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let legacy_login_failure = match get("LEGACY_LOGIN_FAILURE") {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Invalid { key: "LEGACY_LOGIN_FAILURE", value }),
            },
            None => false,
        };

        Ok(Self {
            service_name,
            host,
            port,
            database_url,
            jwt_secret,
            bcrypt_cost,
            allowed_origins,
            legacy_login_failure,
        })
    }
}

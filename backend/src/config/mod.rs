//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and the process-wide secrets (password
//! pepper and token signing key). Secrets live only inside this struct and
//! are handed to the hasher and token service at startup; they are never
//! logged and never written anywhere.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Server-side secret appended to every password before hashing.
    pub pepper: String,
    /// HMAC key for signing session tokens.
    pub jwt_secret: String,
    /// Session token lifetime handed to the token service at login.
    pub token_ttl_minutes: i64,
    /// Validity window of a password reset code.
    pub reset_code_ttl_minutes: i64,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let pepper = env::var("PEPPER").context("PEPPER not set")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let token_ttl_minutes = env::var("TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()
            .context("TOKEN_TTL_MINUTES must be a valid number")?;

        let reset_code_ttl_minutes = env::var("RESET_CODE_TTL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<i64>()
            .context("RESET_CODE_TTL_MINUTES must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            pepper,
            jwt_secret,
            token_ttl_minutes,
            reset_code_ttl_minutes,
            server_port,
        })
    }
}

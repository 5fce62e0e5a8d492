use std::str::FromStr;

use anyhow::{Context, Result};

use crate::github::client::DEFAULT_GITHUB_API_URL;
use crate::llm_client::DEFAULT_GEMINI_API_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a numeric one does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub generation_timeout_secs: u64,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub github_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_url: env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            generation_timeout_secs: parse_env("GENERATION_TIMEOUT_SECS", 60)?,
            github_api_url: env_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            github_token: optional_env("GITHUB_TOKEN"),
            github_timeout_secs: parse_env("GITHUB_TIMEOUT_SECS", 30)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_names_the_variable() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert_eq!(parse_value::<u64>("GITHUB_TIMEOUT_SECS", " 15 ").unwrap(), 15);
    }
}

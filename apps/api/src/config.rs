use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL_PREFERENCE};

/// Which `CompletionOracle` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleMode {
    Gemini,
    /// Offline canned replies; no API key needed.
    Stub,
}

impl FromStr for OracleMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(OracleMode::Gemini),
            "stub" => Ok(OracleMode::Stub),
            other => bail!("INSIGHTS_ORACLE must be 'gemini' or 'stub', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub oracle_mode: OracleMode,
    /// Required in `Gemini` mode.
    pub google_api_key: Option<String>,
    pub gemini_api_base: String,
    pub model_preference: Vec<String>,
    pub oracle_timeout: Duration,
    pub engagement_log_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let oracle_mode = match lookup("INSIGHTS_ORACLE") {
            Some(mode) => mode.parse()?,
            None => OracleMode::Gemini,
        };

        let google_api_key = lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty());
        if oracle_mode == OracleMode::Gemini && google_api_key.is_none() {
            bail!("Required environment variable 'GOOGLE_API_KEY' is not set");
        }

        let model_preference = match lookup("GEMINI_MODEL_PREFERENCE") {
            Some(list) => parse_list(&list),
            None => Vec::new(),
        };
        let model_preference = if model_preference.is_empty() {
            DEFAULT_MODEL_PREFERENCE.iter().map(|m| m.to_string()).collect()
        } else {
            model_preference
        };

        let oracle_timeout_secs = lookup("ORACLE_TIMEOUT_SECS")
            .unwrap_or_else(|| "120".to_string())
            .parse::<u64>()
            .context("ORACLE_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            oracle_mode,
            google_api_key,
            gemini_api_base: lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model_preference,
            oracle_timeout: Duration::from_secs(oracle_timeout_secs),
            engagement_log_path: lookup("ENGAGEMENT_LOG_PATH")
                .unwrap_or_else(|| "data/user_engagement_log.json".to_string())
                .into(),
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

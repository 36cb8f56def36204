//! Application configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::infrastructure::ollama::{
    DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL,
};
use crate::infrastructure::randomuser::{DEFAULT_NATIONALITIES, DEFAULT_RANDOMUSER_BASE_URL};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub persona: PersonaConfig,
    /// Static airport names JSON; names fall back to bare codes when unset
    pub airport_metadata_path: Option<PathBuf>,
    /// Live telemetry JSON written by the simulator bridge
    pub telemetry_path: PathBuf,
    /// Proximity Tracker cadence
    pub proximity_interval: Duration,
    pub pilot: PilotConfig,
}

/// Chat backend configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

/// Where controller personas come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaSource {
    RandomUser,
    Local,
}

impl std::str::FromStr for PersonaSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "randomuser" | "remote" => Ok(PersonaSource::RandomUser),
            "local" | "offline" => Ok(PersonaSource::Local),
            other => bail!("unknown persona source '{other}' (expected 'randomuser' or 'local')"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersonaConfig {
    pub source: PersonaSource,
    pub base_url: String,
    /// Comma-separated nationality filter
    pub nationalities: String,
}

/// Pilot identity; `callsign == None` means no pilot is signed in
#[derive(Debug, Clone, Default)]
pub struct PilotConfig {
    pub callsign: Option<String>,
    pub name: Option<String>,
    pub licensed_since: Option<NaiveDate>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            llm: LlmConfig {
                base_url: env::var("LLM_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string()),
                timeout_secs: env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_LLM_TIMEOUT_SECS.to_string())
                    .parse()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
                temperature: optional_var("LLM_TEMPERATURE")
                    .map(|t| t.parse::<f32>())
                    .transpose()
                    .context("LLM_TEMPERATURE must be a number")?,
            },

            persona: PersonaConfig {
                source: env::var("PERSONA_SOURCE")
                    .unwrap_or_else(|_| "randomuser".to_string())
                    .parse()
                    .context("PERSONA_SOURCE is invalid")?,
                base_url: env::var("PERSONA_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_RANDOMUSER_BASE_URL.to_string()),
                nationalities: env::var("PERSONA_NATIONALITIES")
                    .unwrap_or_else(|_| DEFAULT_NATIONALITIES.to_string()),
            },

            airport_metadata_path: optional_var("AIRPORT_METADATA_PATH").map(PathBuf::from),
            telemetry_path: env::var("TELEMETRY_PATH")
                .unwrap_or_else(|_| "telemetry.json".to_string())
                .into(),

            proximity_interval: Duration::from_millis(
                env::var("PROXIMITY_INTERVAL_MS")
                    .unwrap_or_else(|_| "500".to_string())
                    .parse()
                    .context("PROXIMITY_INTERVAL_MS must be a whole number of milliseconds")?,
            ),

            pilot: PilotConfig {
                callsign: optional_var("PILOT_CALLSIGN"),
                name: optional_var("PILOT_NAME"),
                licensed_since: optional_var("PILOT_LICENSED_SINCE")
                    .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
                    .transpose()
                    .context("PILOT_LICENSED_SINCE must be a YYYY-MM-DD date")?,
            },
        })
    }
}

/// Unset and blank are the same thing.
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

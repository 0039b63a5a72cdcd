use crate::errors::{Error, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_USER_AGENT: &str = "software@example.com";

/// Deterministic decoding by default; the analysis is a classification task.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_MAX_FILING_CHARS: usize = 48_000;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_key: String,
    pub openai_model: String,
    pub openai_api_base: String,
    pub temperature: f32,
    pub max_filing_chars: usize,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let openai_key = std::env::var("OPENAI_KEY")
            .map_err(|_| Error::Config("OPENAI_KEY environment variable not set".to_string()))?;

        let openai_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let openai_api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let temperature = match std::env::var("PULSE8K_TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>().map_err(|_| {
                Error::Config(format!("PULSE8K_TEMPERATURE is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let max_filing_chars = match std::env::var("PULSE8K_MAX_FILING_CHARS") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                Error::Config(format!("PULSE8K_MAX_FILING_CHARS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_MAX_FILING_CHARS,
        };

        let user_agent =
            std::env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            openai_key,
            openai_model,
            openai_api_base,
            temperature,
            max_filing_chars,
            user_agent,
        })
    }
}

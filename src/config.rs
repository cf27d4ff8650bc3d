use reqwest::Url;
use std::env;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(String);

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: Url,
    pub api_token: Option<String>,
}

impl Config {
    /// Reads `PORT`, `FITNESS_API_URL` and `FITNESS_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let raw_url = lookup("FITNESS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .map_err(|err| ConfigError(format!("FITNESS_API_URL '{raw_url}' is invalid: {err}")))?;

        Ok(Self {
            port,
            api_url,
            api_token: lookup("FITNESS_API_TOKEN"),
        })
    }
}

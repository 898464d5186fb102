//! Client configuration.
//!
//! The base URL of the prediction service, the transport timeout and the
//! display language are fixed when the client is created and never change
//! afterwards. The command line fills them from flags or from the
//! `AIRPROYECT_BASE_URL`, `AIRPROYECT_TIMEOUT_SECS` and `AIRPROYECT_LANG`
//! environment variables, with defaults for local development.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const PREDICT_PATH: &str = "/predict";

/// Language used for every user-facing string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Es,
    En,
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spa" | "spanish" | "español" => Ok(Language::Es),
            "en" | "eng" | "english" => Ok(Language::En),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Es => f.write_str("es"),
            Language::En => f.write_str("en"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    language: Language,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: Language::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Absolute URL of the prediction endpoint.
    ///
    /// `/predict` is rooted at the host, so any path on the base URL is
    /// replaced rather than extended.
    pub fn predict_url(&self) -> Result<Url, ConfigError> {
        self.base_url
            .join(PREDICT_PATH)
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

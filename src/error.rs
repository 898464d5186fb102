//! Error types for input validation and client configuration.

use std::fmt;

use thiserror::Error;

/// One of the four sensor inputs, in the order they appear on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pm10,
    Pm25,
    No2,
    O3,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Pm10, Field::Pm25, Field::No2, Field::O3];

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Pm10 => "PM10",
            Field::Pm25 => "PM2.5",
            Field::No2 => "NO2",
            Field::O3 => "O3",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the four inputs could not be turned into a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An input was empty or whitespace only.
    #[error("{field} is required")]
    MissingField { field: Field },

    /// An input did not parse as a finite number.
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: Field, value: String },
}

/// Startup-time configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unsupported language {0:?} (expected \"es\" or \"en\")")]
    UnknownLanguage(String),

    #[error("invalid timeout {0:?}: expected whole seconds greater than zero")]
    InvalidTimeout(String),

    #[error("the prediction client must be created inside a tokio runtime")]
    NoRuntime,

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

//! HTTP client for the remote prediction service.
//!
//! Each call is one `POST /predict` with the four readings as JSON. The
//! client keeps no state between calls apart from its immutable
//! configuration, so it can be cloned freely and shared across tasks.

use std::error::Error as StdError;

use log::{error, info, warn};
use reqwest::{Client, Url};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::{ClientConfig, Language};
use crate::error::ConfigError;
use crate::models::{PredictionRequest, PredictionResponse};
use crate::recommendation::Recommendation;

/// Final state of one prediction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Classified {
        label: String,
        recommendation: Recommendation,
    },
    ServerError {
        status: u16,
    },
    TransportError {
        message: String,
    },
}

impl Outcome {
    /// Only a classification carries a recommendation.
    pub fn recommendation(&self) -> Option<Recommendation> {
        match self {
            Outcome::Classified { recommendation, .. } => Some(*recommendation),
            _ => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Outcome::Classified { .. })
    }

    /// One-line summary shown above the recommendation.
    pub fn headline(&self, language: Language) -> String {
        match (self, language) {
            (Outcome::Classified { label, .. }, Language::Es) => {
                format!("La calidad del aire es {label}.")
            }
            (Outcome::Classified { label, .. }, Language::En) => format!("Air quality is {label}."),
            (Outcome::ServerError { status }, _) => format!("Error: {status}"),
            (Outcome::TransportError { message }, Language::Es) => format!("Fallo: {message}"),
            (Outcome::TransportError { message }, Language::En) => format!("Failure: {message}"),
        }
    }
}

/// Label used when the service answers without one.
pub fn default_label(language: Language) -> &'static str {
    match language {
        Language::Es => "Desconocida",
        Language::En => "Unknown",
    }
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    endpoint: Url,
    language: Language,
    runtime: Handle,
}

impl PredictionClient {
    /// Must be called from within a tokio runtime; background calls started
    /// with [`enqueue`](Self::enqueue) run on that runtime.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            endpoint: config.predict_url()?,
            language: config.language(),
            runtime,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Outcome {
        info!(
            "POST {} PM10={} PM2_5={} NO2={} O3={}",
            self.endpoint, request.pm10, request.pm2_5, request.no2, request.o3
        );

        let response = match self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_failure(&e),
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Prediction service answered {}", status);
            return Outcome::ServerError {
                status: status.as_u16(),
            };
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return transport_failure(&e),
        };

        let label = match decode_label(&body) {
            Ok(label) => label.unwrap_or_else(|| default_label(self.language).to_string()),
            Err(e) => {
                error!("Malformed prediction body: {}", e);
                return Outcome::TransportError {
                    message: format!("malformed response body: {e}"),
                };
            }
        };

        let recommendation = Recommendation::for_label(&label);
        info!("Classified as {:?} -> {:?}", label, recommendation);
        Outcome::Classified {
            label,
            recommendation,
        }
    }

    /// Runs [`predict`](Self::predict) in the background and hands the
    /// outcome to `on_complete` once it resolves. Works from any thread.
    pub fn enqueue<F>(&self, request: PredictionRequest, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let client = self.clone();
        self.runtime.spawn(async move {
            let outcome = client.predict(&request).await;
            on_complete(outcome);
        })
    }
}

// An empty body or a JSON `null` means "no label", same as a missing field.
fn decode_label(body: &[u8]) -> Result<Option<String>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let response: Option<PredictionResponse> = serde_json::from_slice(body)?;
    Ok(response.and_then(PredictionResponse::label))
}

fn transport_failure(e: &reqwest::Error) -> Outcome {
    let mut message = if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        e.to_string()
    };
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    if message.trim().is_empty() {
        message = "unknown transport error".to_string();
    }

    error!("Prediction request failed: {}", message);
    Outcome::TransportError { message }
}

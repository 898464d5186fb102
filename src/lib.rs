//! Air-quality prediction client.
//!
//! Four sensor readings (PM10, PM2.5, NO2, O3) typed by an operator are
//! validated into a [`PredictionRequest`], posted to a remote `/predict`
//! endpoint, and the returned classification is paired with a canned
//! [`Recommendation`].
//!
//! ```text
//! input text ─► PredictionRequest::build ─► PredictionClient::predict ─► Outcome
//!                     │                                                    │
//!                     └─ ValidationError (no request sent)                 └─ Recommendation::for_label
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod recommendation;
pub mod screen;

pub use client::{Outcome, PredictionClient};
pub use config::{ClientConfig, Language};
pub use error::{ConfigError, Field, ValidationError};
pub use models::{PredictionRequest, PredictionResponse};
pub use recommendation::Recommendation;
pub use screen::{PredictionScreen, ScreenState, Submission};

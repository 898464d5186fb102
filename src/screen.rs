//! Headless model of the prediction screen.
//!
//! Holds what the screen shows (the four inputs, the result line, the
//! recommendation and the loading flag) and implements its two actions,
//! reset and predict. A front-end only has to render [`ScreenState`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{info, warn};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::client::{Outcome, PredictionClient};
use crate::config::Language;
use crate::error::{Field, ValidationError};
use crate::models::PredictionRequest;

/// The four inputs exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorForm {
    pub pm10: String,
    pub pm25: String,
    pub no2: String,
    pub o3: String,
}

impl SensorForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Pm10 => &self.pm10,
            Field::Pm25 => &self.pm25,
            Field::No2 => &self.no2,
            Field::O3 => &self.o3,
        }
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::Pm10 => &mut self.pm10,
            Field::Pm25 => &mut self.pm25,
            Field::No2 => &mut self.no2,
            Field::O3 => &mut self.o3,
        };
        *slot = text.into();
    }

    pub fn build(&self) -> Result<PredictionRequest, ValidationError> {
        PredictionRequest::build(&self.pm10, &self.pm25, &self.no2, &self.o3)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub form: SensorForm,
    pub result: String,
    /// Empty unless the last call produced a classification.
    pub recommendation: String,
    pub is_loading: bool,
}

impl ScreenState {
    fn apply(&mut self, outcome: &Outcome, language: Language) {
        self.is_loading = false;
        self.result = outcome.headline(language);
        self.recommendation = outcome
            .recommendation()
            .map(|r| r.text(language).to_string())
            .unwrap_or_default();
    }
}

pub fn validation_message(error: &ValidationError, language: Language) -> &'static str {
    match (error, language) {
        (ValidationError::MissingField { .. }, Language::Es) => {
            "Por favor completa todos los campos."
        }
        (ValidationError::MissingField { .. }, Language::En) => "Please fill in all fields.",
        (ValidationError::InvalidNumber { .. }, Language::Es) => "Error al convertir datos",
        (ValidationError::InvalidNumber { .. }, Language::En) => "Could not convert the data",
    }
}

/// At most one prediction per screen may be pending.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

impl InFlightGuard {
    pub fn try_acquire(&self) -> Option<InFlightTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Releases the guard when dropped.
#[derive(Debug)]
pub struct InFlightTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// What happened when the operator pressed Predict.
#[derive(Debug)]
pub enum Submission {
    /// A previous prediction is still pending.
    Ignored,
    /// The inputs did not validate; nothing was sent.
    Rejected(ValidationError),
    /// The request is on its way. The handle resolves after the screen
    /// state has been updated.
    Dispatched(JoinHandle<()>),
}

/// Snapshot of the result area, ready to print.
#[derive(Debug, Clone)]
pub struct ResultCard {
    pub headline: String,
    pub recommendation: Option<String>,
    pub rendered_at: DateTime<Local>,
}

pub struct PredictionScreen {
    client: PredictionClient,
    state: Arc<Mutex<ScreenState>>,
    guard: InFlightGuard,
}

impl PredictionScreen {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(ScreenState::default())),
            guard: InFlightGuard::default(),
        }
    }

    pub fn language(&self) -> Language {
        self.client.language()
    }

    pub fn state(&self) -> ScreenState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn set_field(&self, field: Field, text: impl Into<String>) {
        self.state.lock().form.set(field, text);
    }

    /// Clears the inputs and the result area.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.form = SensorForm::default();
        state.result.clear();
        state.recommendation.clear();
    }

    pub fn submit(&self) -> Submission {
        let Some(ticket) = self.guard.try_acquire() else {
            warn!("Prediction already in flight, ignoring submit");
            return Submission::Ignored;
        };

        let language = self.language();
        let request = {
            let mut state = self.state.lock();
            match state.form.build() {
                Ok(request) => {
                    state.is_loading = true;
                    request
                }
                Err(e) => {
                    info!("Rejected input: {}", e);
                    state.result = validation_message(&e, language).to_string();
                    state.recommendation.clear();
                    return Submission::Rejected(e);
                }
            }
        };

        let state = Arc::downgrade(&self.state);
        let handle = self.client.enqueue(request, move |outcome| {
            let _ticket = ticket;
            match state.upgrade() {
                Some(state) => state.lock().apply(&outcome, language),
                None => info!("Screen closed, discarding {:?}", outcome),
            }
        });
        Submission::Dispatched(handle)
    }

    pub fn card(&self) -> ResultCard {
        let state = self.state.lock();
        ResultCard {
            headline: state.result.clone(),
            recommendation: Some(state.recommendation.clone()).filter(|r| !r.is_empty()),
            rendered_at: Local::now(),
        }
    }
}

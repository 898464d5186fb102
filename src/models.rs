use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};

/// The four concentrations sent to the prediction service, in µg/m³.
///
/// Only [`PredictionRequest::build`] produces one from user input, so a
/// request always carries all four readings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    #[serde(rename = "PM10")]
    pub pm10: f32,
    #[serde(rename = "PM2_5")]
    pub pm2_5: f32,
    #[serde(rename = "NO2")]
    pub no2: f32,
    #[serde(rename = "O3")]
    pub o3: f32,
}

impl PredictionRequest {
    /// Validates the four raw inputs and converts them into a request.
    ///
    /// Every input is checked for blankness before any of them is parsed, so
    /// a blank field is reported as [`ValidationError::MissingField`] even if
    /// another field holds garbage.
    pub fn build(
        pm10: &str,
        pm25: &str,
        no2: &str,
        o3: &str,
    ) -> Result<Self, ValidationError> {
        let inputs = [
            (Field::Pm10, pm10),
            (Field::Pm25, pm25),
            (Field::No2, no2),
            (Field::O3, o3),
        ];

        if let Some((field, _)) = inputs.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(ValidationError::MissingField { field: *field });
        }

        let mut values = [0.0f32; 4];
        for (slot, (field, text)) in values.iter_mut().zip(inputs.iter()) {
            *slot = parse_reading(*field, text)?;
        }

        let [pm10, pm2_5, no2, o3] = values;
        Ok(Self {
            pm10,
            pm2_5,
            no2,
            o3,
        })
    }
}

// JSON has no NaN or infinity, serde_json would write them as null.
fn parse_reading(field: Field, text: &str) -> Result<f32, ValidationError> {
    match text.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// Body returned by the prediction service.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PredictionResponse {
    #[serde(rename = "prediccion", default)]
    pub prediction: Option<String>,
}

impl PredictionResponse {
    pub fn label(self) -> Option<String> {
        self.prediction
    }
}

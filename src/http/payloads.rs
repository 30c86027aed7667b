use serde::{Deserialize, Serialize};

use crate::service::{Example, Trained};

/// Message of the health check.
pub const HEALTH_MESSAGE: &str = "TextLabX API lista";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            message: HEALTH_MESSAGE,
        }
    }
}

/// Body of `POST /train`.
#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    #[serde(rename = "ejemplos")]
    pub examples: Vec<Example>,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub status: &'static str,
    pub model_id: String,
    pub endpoint: String,
}

impl From<Trained> for TrainResponse {
    fn from(value: Trained) -> Self {
        Self {
            status: "ok",
            model_id: value.model_id.to_string(),
            endpoint: value.endpoint,
        }
    }
}

/// Body of `POST /predict/{model_id}`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub texto: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub categoria: String,
}

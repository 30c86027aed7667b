use std::{error::Error, fmt, io};

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::Level;
use machine_learning::MlErr;
use serde::Serialize;

/// Message returned when a model identifier can't be resolved.
pub const NOT_FOUND_MSG: &str = "Modelo no encontrado. Verificá el ID.";

/// The service's result type.
pub type Result<T> = std::result::Result<T, ServiceErr>;

/// Failures of the training and prediction handlers.
#[derive(Debug)]
pub enum ServiceErr {
    /// No cached model nor store entry exists for the identifier.
    NotFound { model_id: String },
    /// The pipeline could not be fitted on the given examples.
    Training(MlErr),
    /// A store entry exists but can't be deserialized.
    CorruptModel {
        model_id: String,
        source: serde_json::Error,
    },
    Io(io::Error),
    /// A blocking task panicked or was cancelled.
    Worker(String),
}

impl ServiceErr {
    /// The level a failed request is logged at.
    ///
    /// Client mistakes are warnings, anything that breaks on the server side is an error.
    /// Unknown models are already reported by the registry.
    pub fn log_level(&self) -> Level {
        match self {
            ServiceErr::NotFound { .. } => Level::Debug,
            ServiceErr::Training(_) => Level::Warn,
            ServiceErr::CorruptModel { .. } | ServiceErr::Io(_) | ServiceErr::Worker(_) => {
                Level::Error
            }
        }
    }
}

impl fmt::Display for ServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceErr::NotFound { .. } => write!(f, "{NOT_FOUND_MSG}"),
            ServiceErr::Training(e) => write!(f, "training failed: {e}"),
            ServiceErr::CorruptModel { model_id, source } => {
                write!(f, "stored model {model_id} is corrupt: {source}")
            }
            ServiceErr::Io(e) => write!(f, "io error: {e}"),
            ServiceErr::Worker(msg) => write!(f, "blocking task failed: {msg}"),
        }
    }
}

impl Error for ServiceErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceErr::Training(e) => Some(e),
            ServiceErr::CorruptModel { source, .. } => Some(source),
            ServiceErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ServiceErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MlErr> for ServiceErr {
    fn from(value: MlErr) -> Self {
        Self::Training(value)
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for ServiceErr {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceErr::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceErr::Training(_) => StatusCode::BAD_REQUEST,
            ServiceErr::CorruptModel { .. } | ServiceErr::Io(_) | ServiceErr::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrupt() -> ServiceErr {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        ServiceErr::CorruptModel {
            model_id: "0badf00d".into(),
            source,
        }
    }

    #[test]
    fn test_server_failures_log_as_errors() {
        let io = ServiceErr::from(io::Error::other("disk full"));
        let worker = ServiceErr::Worker("task panicked".into());

        for err in [corrupt(), io, worker] {
            assert_eq!(err.log_level(), Level::Error, "{err}");
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_client_failures_log_below_error() {
        let training = ServiceErr::from(MlErr::TooFewClasses { got: 1 });
        assert_eq!(training.log_level(), Level::Warn);
        assert_eq!(training.status_code(), StatusCode::BAD_REQUEST);

        let not_found = ServiceErr::NotFound {
            model_id: "deadbeef".into(),
        };
        assert!(not_found.log_level() > Level::Warn);
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_corrupt_model_message_names_the_model() {
        assert!(corrupt().to_string().starts_with("stored model 0badf00d is corrupt"));
    }
}

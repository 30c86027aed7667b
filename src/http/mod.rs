mod payloads;
mod routes;

use actix_cors::Cors;
use actix_web::{HttpResponse, error::InternalError, web};

pub use payloads::{
    HEALTH_MESSAGE, HealthResponse, PredictRequest, PredictResponse, TrainRequest, TrainResponse,
};

use crate::error::ErrorBody;

/// Registers the service routes and the JSON body configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("rejected request body: {err}");
        let body = ErrorBody {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json)
        .route("/", web::get().to(routes::health))
        .route("/train", web::post().to(routes::train))
        .route("/predict/{model_id}", web::post().to(routes::predict));
}

/// Cross-origin policy of the service: every origin, method and header is allowed.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
}

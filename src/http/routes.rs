use actix_web::{HttpResponse, web};
use tokio::task;

use super::payloads::{HealthResponse, PredictRequest, PredictResponse, TrainRequest, TrainResponse};
use crate::{
    error::{Result, ServiceErr},
    service::TextLab,
};

/// `GET /`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::default())
}

/// `POST /train`
pub async fn train(
    lab: web::Data<TextLab>,
    body: web::Json<TrainRequest>,
) -> Result<HttpResponse> {
    let lab = lab.into_inner();
    let examples = body.into_inner().examples;

    let trained = run_blocking(move || lab.train(&examples)).await?;
    Ok(HttpResponse::Ok().json(TrainResponse::from(trained)))
}

/// `POST /predict/{model_id}`
pub async fn predict(
    lab: web::Data<TextLab>,
    model_id: web::Path<String>,
    body: web::Json<PredictRequest>,
) -> Result<HttpResponse> {
    let lab = lab.into_inner();
    let model_id = model_id.into_inner();
    let text = body.into_inner().texto;

    let categoria = run_blocking(move || lab.predict(&model_id, &text)).await?;
    Ok(HttpResponse::Ok().json(PredictResponse { categoria }))
}

/// Runs a blocking service call off the async workers, logging its failure.
async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = match task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(ServiceErr::Worker(e.to_string())),
    };

    if let Err(e) = &result {
        log::log!(e.log_level(), "request failed: {e}");
    }
    result
}

use actix_web::{App, HttpServer, middleware::Logger, web};
use log::info;

use textlabx::{Config, TextLab, http};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let lab = web::Data::new(TextLab::open(&config)?);

    info!("storing models in {}", config.model_dir.display());
    match config.cache_capacity {
        Some(capacity) => info!("model cache bounded to {capacity} entries"),
        None => info!("model cache unbounded"),
    }

    let addr = (config.host.clone(), config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(http::cors())
            .app_data(lab.clone())
            .configure(http::configure)
    })
    .bind(&addr)?;

    info!("listening at {}:{}", addr.0, addr.1);
    server.run().await?;

    Ok(())
}

//! HTTP service exposing the AI content-generation operations: page content
//! for an existing destination and one-shot destination profiles with a
//! best-effort hero image.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use shared::{ai_client::FallbackClient, config::Settings, storage::BucketClient};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod routes;
use routes::AppState;

fn fatal(e: impl std::fmt::Display) -> std::io::Error {
    error!(%e, "startup configuration error");
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    info!("starting content-api service");

    let settings = Settings::new().map_err(fatal)?;
    let ai = FallbackClient::from_settings(&settings).map_err(fatal)?;
    let store = BucketClient::from_settings(&settings).map_err(fatal)?;
    let state = web::Data::new(AppState { ai, store });

    info!("starting http server on port 8084");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", 8084))?
    .run()
    .await
}

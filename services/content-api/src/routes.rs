//! Route handlers for the content-generation operations.

use actix_web::{web, HttpResponse, Responder};
use shared::{
    ai_client::FallbackClient,
    dto::{GenerateContentRequest, GenerateDestinationRequest},
    error::AppError,
    ops,
    storage::BucketClient,
};

pub struct AppState {
    pub ai: FallbackClient,
    pub store: BucketClient,
}

/// Simple liveness endpoint for orchestration.
pub async fn health() -> impl Responder {
    "OK"
}

pub async fn generate_content(
    state: web::Data<AppState>,
    web::Json(req): web::Json<GenerateContentRequest>,
) -> Result<HttpResponse, AppError> {
    let record = ops::generate_content(&state.ai, &req.destination, req.page_type).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn generate_destination(
    state: web::Data<AppState>,
    web::Json(req): web::Json<GenerateDestinationRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = ops::generate_destination(
        &state.ai,
        &state.store,
        &req.city_name,
        &req.country_name,
        &req.country_code,
        &req.category,
    )
    .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Register the service routes on an actix app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/generate-content", web::post().to(generate_content))
        .route(
            "/generate-destination",
            web::post().to(generate_destination),
        );
}

//! HTTP service that refreshes the stored restaurant set for a destination
//! from the nearby-places API: search, per-candidate details, and a
//! transactional replace of the previous batch.

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use shared::{
    config::Settings,
    db,
    dto::{RefreshRestaurantsRequest, RefreshRestaurantsResponse},
    error::AppError,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod places;
use places::PlacesClient;

fn ensure_sslmode_disable(url: &str) -> String {
    if url.to_lowercase().contains("sslmode=") {
        url.to_string()
    } else if url.contains('?') {
        format!("{url}&sslmode=disable")
    } else {
        format!("{url}?sslmode=disable")
    }
}

struct AppState {
    places: PlacesClient,
    pool: PgPool,
}

async fn health() -> impl Responder {
    "OK"
}

async fn refresh_restaurants(
    state: web::Data<AppState>,
    web::Json(req): web::Json<RefreshRestaurantsRequest>,
) -> Result<HttpResponse, AppError> {
    if req.destination_name.trim().is_empty() {
        return Err(AppError::ClientInput("destinationName".into()));
    }
    info!(
        destination = %req.destination_name,
        lat = req.lat,
        lng = req.lng,
        "refreshing restaurants"
    );

    let venues = state
        .places
        .collect_venues(req.destination_id, req.lat, req.lng)
        .await?;
    db::replace_venues(&state.pool, req.destination_id, &venues).await?;
    info!(
        destination = %req.destination_name,
        count = venues.len(),
        "restaurant set replaced"
    );

    Ok(HttpResponse::Ok().json(RefreshRestaurantsResponse {
        count: venues.len(),
        restaurants: venues,
    }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    info!("starting places-sync service");

    let settings = Settings::new()?;
    let places = PlacesClient::from_settings(&settings)?;

    let db_url = ensure_sslmode_disable(&settings.database_url);
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;
    info!("connected to database");
    db::ensure_schema(&pool).await?;

    let state = web::Data::new(AppState { places, pool });

    info!("starting http server on port 8085");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .route("/health", web::get().to(health))
            .route("/refresh-restaurants", web::post().to(refresh_restaurants))
    })
    .bind(("0.0.0.0", 8085))?
    .run()
    .await?;
    Ok(())
}

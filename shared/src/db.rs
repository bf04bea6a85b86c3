//! Database helpers shared by the backend services.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::VenueRecord;
use crate::error::AppError;

/// Create the restaurants table when it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS restaurants (
            id BIGSERIAL PRIMARY KEY,
            destination_id UUID NOT NULL,
            place_id TEXT NOT NULL,
            name TEXT NOT NULL,
            address TEXT,
            phone TEXT,
            website TEXT,
            maps_url TEXT,
            photo_url TEXT,
            rating DOUBLE PRECISION,
            rating_count INTEGER,
            price_level SMALLINT,
            opening_hours TEXT[] NOT NULL DEFAULT '{}',
            open_now BOOLEAN,
            cuisine_types TEXT[] NOT NULL DEFAULT '{}',
            sort_order INTEGER NOT NULL,
            is_visible BOOLEAN NOT NULL DEFAULT TRUE
        )",
    )
    .execute(pool)
    .await
    .map_err(db_err)?;
    Ok(())
}

/// Replace the stored restaurant set for a destination in one transaction.
///
/// The delete runs even for an empty batch: a refresh that found nothing
/// leaves the destination without venues, which is a valid outcome. Readers
/// never observe the interim state between delete and insert.
pub async fn replace_venues(
    pool: &PgPool,
    destination_id: Uuid,
    venues: &[VenueRecord],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    sqlx::query("DELETE FROM restaurants WHERE destination_id = $1")
        .bind(destination_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

    for venue in venues {
        sqlx::query(
            "INSERT INTO restaurants (
                destination_id, place_id, name, address, phone, website, maps_url,
                photo_url, rating, rating_count, price_level, opening_hours,
                open_now, cuisine_types, sort_order, is_visible
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(venue.destination_id)
        .bind(&venue.place_id)
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.website)
        .bind(&venue.maps_url)
        .bind(&venue.photo_url)
        .bind(venue.rating)
        .bind(venue.rating_count)
        .bind(venue.price_level)
        .bind(&venue.opening_hours)
        .bind(venue.open_now)
        .bind(&venue.cuisine_types)
        .bind(venue.sort_order)
        .bind(venue.is_visible)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
    }

    tx.commit().await.map_err(db_err)?;
    Ok(())
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::Persistence(e.to_string())
}

//! The generation operations, composed end to end: prompt construction,
//! fallback-client execution, relaxed parsing and schema validation.

use base64::Engine as _;
use tracing::{info, warn};

use crate::ai_client::FallbackClient;
use crate::ai_settings;
use crate::dto::{DestinationInput, GeneratedContentRecord, GeneratedDestinationProfile, PageType};
use crate::error::AppError;
use crate::json_relaxed::parse_json_relaxed;
use crate::prompt;
use crate::schema::{CONTENT_SCHEMA, PROFILE_SCHEMA};
use crate::storage::ObjectStore;

/// Generate SEO content for one destination page.
pub async fn generate_content(
    ai: &FallbackClient,
    destination: &DestinationInput,
    page_type: PageType,
) -> Result<GeneratedContentRecord, AppError> {
    require(&destination.name, "destination.name")?;
    require(&destination.country, "destination.country")?;
    require(&destination.category, "destination.category")?;

    let user = prompt::content_prompt(destination, page_type);
    let raw = ai.generate(prompt::content_system_prompt(), &user, 0.7).await?;
    let value = parse_json_relaxed(&raw)?;
    CONTENT_SCHEMA.validate(&value)?;
    let record: GeneratedContentRecord = serde_json::from_value(value)
        .map_err(|e| AppError::MalformedResponse(format!("content record mismatch: {e}")))?;
    info!(destination = %destination.name, page_type = %page_type, "generated page content");
    Ok(record)
}

/// Generate a full destination profile with a best-effort hero image.
///
/// A hero-image failure never fails the profile: the field is simply left
/// empty.
pub async fn generate_destination(
    ai: &FallbackClient,
    store: &dyn ObjectStore,
    city: &str,
    country: &str,
    country_code: &str,
    category: &str,
) -> Result<GeneratedDestinationProfile, AppError> {
    require(city, "cityName")?;
    require(country, "countryName")?;
    require(category, "category")?;

    let user = prompt::profile_prompt(city, country, country_code, category);
    let raw = ai.generate(prompt::profile_system_prompt(), &user, 0.3).await?;
    let value = parse_json_relaxed(&raw)?;
    PROFILE_SCHEMA.validate(&value)?;
    let mut profile: GeneratedDestinationProfile = serde_json::from_value(value)
        .map_err(|e| AppError::MalformedResponse(format!("profile record mismatch: {e}")))?;
    info!(city, slug = %profile.slug, "generated destination profile");

    profile.hero_image = generate_hero_image(ai, store, city, country, category, &profile.slug).await;
    Ok(profile)
}

/// Produce and store a hero image, degrading to `None` on any failure.
pub async fn generate_hero_image(
    ai: &FallbackClient,
    store: &dyn ObjectStore,
    city: &str,
    country: &str,
    category: &str,
    slug: &str,
) -> Option<String> {
    match try_hero_image(ai, store, city, country, category, slug).await {
        Ok(url) => {
            info!(slug, url = %url, "hero image stored");
            Some(url)
        }
        Err(e) => {
            warn!(slug, error = %e, "hero image generation failed, continuing without");
            None
        }
    }
}

async fn try_hero_image(
    ai: &FallbackClient,
    store: &dyn ObjectStore,
    city: &str,
    country: &str,
    category: &str,
    slug: &str,
) -> Result<String, AppError> {
    let instruction = prompt::hero_image_prompt(city, country, category);
    let data_uri = ai.generate_image(ai_settings::IMAGE_MODEL, &instruction).await?;
    let (mime, bytes) = decode_data_uri(&data_uri)?;
    let key = format!("destinations/{}.{}", slug, extension_for(&mime));
    store.put(&key, bytes, &mime).await
}

/// Split a `data:<mime>;base64,<payload>` URI into MIME type and bytes.
fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), AppError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::MalformedResponse("image payload is not a data URI".into()))?;
    let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
        AppError::MalformedResponse("image payload is not base64 encoded".into())
    })?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::MalformedResponse(format!("invalid image payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}

/// File extension for the storage key, from the declared MIME type.
fn extension_for(mime: &str) -> &str {
    match mime {
        "image/jpeg" => "jpg",
        _ => mime.strip_prefix("image/").unwrap_or("png"),
    }
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ClientInput(field.to_string()));
    }
    Ok(())
}

//! Client for the nearby-places API and the mapping into venue records.

use serde::Deserialize;
use shared::config::Settings;
use shared::dto::VenueRecord;
use shared::error::AppError;
use tracing::{info, warn};
use uuid::Uuid;

/// Search radius around the destination coordinate, in meters.
const SEARCH_RADIUS_M: u32 = 2000;
/// Maximum number of venues kept per destination.
const MAX_RESULTS: usize = 10;
/// Category tags that carry no cuisine information.
const GENERIC_TAGS: &[&str] = &["restaurant", "food", "point_of_interest", "establishment"];
/// Fields requested from the details endpoint.
const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,website,\
                             url,rating,user_ratings_total,price_level,opening_hours,photos,types";

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    place_id: String,
    name: String,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    url: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<i32>,
    price_level: Option<i16>,
    opening_hours: Option<OpeningHours>,
    photos: Option<Vec<PlacePhoto>>,
    types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    weekday_text: Option<Vec<String>>,
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
}

pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        if settings.places_api_key.is_empty() {
            return Err(AppError::MissingCredentials("PLACES_API_KEY"));
        }
        Ok(Self::new(
            settings.places_api_base.clone(),
            settings.places_api_key.clone(),
        ))
    }

    /// Fetch the venue batch for a destination: a nearby search followed by
    /// a details lookup per candidate. A failed details lookup skips that
    /// candidate; the batch keeps the search's relevance order.
    pub async fn collect_venues(
        &self,
        destination_id: Uuid,
        lat: f64,
        lng: f64,
    ) -> Result<Vec<VenueRecord>, AppError> {
        let candidates = self.nearby_search(lat, lng).await?;
        info!(count = candidates.len(), "nearby search returned candidates");

        let mut venues: Vec<VenueRecord> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let details = match self.place_details(&candidate.place_id).await {
                Ok(details) => details,
                Err(e) => {
                    warn!(place = %candidate.name, error = %e, "skipping candidate, details lookup failed");
                    continue;
                }
            };
            let position = venues.len();
            venues.push(self.to_venue(destination_id, details, position));
        }
        Ok(venues)
    }

    async fn nearby_search(&self, lat: f64, lng: f64) -> Result<Vec<NearbyResult>, AppError> {
        let res = self
            .http
            .get(format!("{}/nearbysearch/json", self.base_url))
            .query(&[
                ("location", format!("{lat},{lng}")),
                ("radius", SEARCH_RADIUS_M.to_string()),
                ("type", "restaurant".to_string()),
                ("keyword", "restaurant".to_string()),
                ("language", "nl".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("nearby search failed: {e}")))?;
        let body: NearbyResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("unreadable nearby-search response: {e}")))?;
        match body.status.as_str() {
            "OK" => Ok(body.results.into_iter().take(MAX_RESULTS).collect()),
            // A search without hits is a valid empty outcome, not an error.
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => Err(AppError::ExternalApi(format!(
                "nearby search returned {status}"
            ))),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, AppError> {
        let res = self
            .http
            .get(format!("{}/details/json", self.base_url))
            .query(&[
                ("place_id", place_id.to_string()),
                ("fields", DETAIL_FIELDS.to_string()),
                ("language", "nl".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("details lookup failed: {e}")))?;
        let body: DetailsResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("unreadable details response: {e}")))?;
        match (body.status.as_str(), body.result) {
            ("OK", Some(details)) => Ok(details),
            (status, _) => Err(AppError::ExternalApi(format!(
                "details lookup returned {status}"
            ))),
        }
    }

    /// Photo download URL for the first photo reference, if any.
    fn photo_url(&self, details: &PlaceDetails) -> Option<String> {
        let photo = details.photos.as_ref()?.first()?;
        Some(format!(
            "{}/photo?maxwidth=800&photo_reference={}&key={}",
            self.base_url, photo.photo_reference, self.api_key
        ))
    }

    fn to_venue(&self, destination_id: Uuid, details: PlaceDetails, position: usize) -> VenueRecord {
        let photo_url = self.photo_url(&details);
        let (opening_hours, open_now) = match details.opening_hours {
            Some(hours) => (hours.weekday_text.unwrap_or_default(), hours.open_now),
            None => (Vec::new(), None),
        };
        VenueRecord {
            destination_id,
            place_id: details.place_id,
            name: details.name,
            address: details.formatted_address,
            phone: details.formatted_phone_number,
            website: details.website,
            maps_url: details.url,
            photo_url,
            rating: details.rating,
            rating_count: details.user_ratings_total,
            price_level: details.price_level,
            opening_hours,
            open_now,
            cuisine_types: cuisine_tags(details.types.as_deref().unwrap_or(&[])),
            sort_order: position as i32,
            is_visible: true,
        }
    }
}

/// Cuisine tags derived from the raw category tags: generic tags dropped,
/// underscores normalized to spaces.
pub fn cuisine_tags(types: &[String]) -> Vec<String> {
    types
        .iter()
        .filter(|t| !GENERIC_TAGS.contains(&t.as_str()))
        .map(|t| t.replace('_', " "))
        .collect()
}

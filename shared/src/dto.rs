use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

/// Which section of a destination content is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PageType {
    Main,
    Hotels,
    Attractions,
    Flights,
    Restaurants,
}

/// Destination identity carried by a content-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationInput {
    pub name: String,
    pub country: String,
    pub category: String,
    #[serde(default)]
    pub nearest_airport: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub destination: DestinationInput,
    pub page_type: PageType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDestinationRequest {
    pub city_name: String,
    pub country_name: String,
    #[serde(default)]
    pub country_code: String,
    pub category: String,
}

/// SEO content produced for one destination page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContentRecord {
    pub title: String,
    pub meta_description: String,
    pub intro_text: String,
    pub main_content: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Full destination profile produced in one shot from a
/// city/country/category triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDestinationProfile {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub country_code: Option<String>,
    pub slug: String,
    pub lat: f64,
    pub lng: f64,
    pub short_description: String,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub average_temperature: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub nearest_airport: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRestaurantsRequest {
    pub destination_id: Uuid,
    pub destination_name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// One restaurant row as persisted for a destination.
#[derive(Debug, Clone, Serialize)]
pub struct VenueRecord {
    pub destination_id: Uuid,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub maps_url: Option<String>,
    pub photo_url: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<i32>,
    pub price_level: Option<i16>,
    pub opening_hours: Vec<String>,
    pub open_now: Option<bool>,
    pub cuisine_types: Vec<String>,
    pub sort_order: i32,
    pub is_visible: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshRestaurantsResponse {
    pub count: usize,
    pub restaurants: Vec<VenueRecord>,
}

//! Places API wire types.
//!
//! Every endpoint wraps its payload in a `{"status": "OK", ...}` envelope.
//! Fields the pipeline never reads are ignored; optional upstream fields are
//! `Option` or `#[serde(default)]` so a sparse payload still deserializes.

use cafemap_core::ServiceFlags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

// ---------------------------------------------------------------------------
// geocode/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeGeometry {
    pub viewport: BoundingBox,
}

// ---------------------------------------------------------------------------
// place/nearbysearch/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceCandidate>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single nearby-search hit, before detail enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    /// Search-summary rating; drives the `highRatings` category.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<CandidateGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateGeometry {
    pub location: LatLng,
}

// ---------------------------------------------------------------------------
// place/details/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetail>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceDetail {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price_level: Option<i64>,
    #[serde(default)]
    pub serves_beer: Option<bool>,
    #[serde(default)]
    pub serves_breakfast: Option<bool>,
    #[serde(default)]
    pub serves_brunch: Option<bool>,
    #[serde(default)]
    pub serves_dinner: Option<bool>,
    #[serde(default)]
    pub serves_lunch: Option<bool>,
    #[serde(default)]
    pub serves_wine: Option<bool>,
    #[serde(default)]
    pub takeout: Option<bool>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub reviews: Option<Vec<PlaceReview>>,
}

impl PlaceDetail {
    /// Service flags with every missing attribute read as `false`.
    #[must_use]
    pub fn services(&self) -> ServiceFlags {
        ServiceFlags {
            serves_beer: self.serves_beer.unwrap_or(false),
            serves_breakfast: self.serves_breakfast.unwrap_or(false),
            serves_brunch: self.serves_brunch.unwrap_or(false),
            serves_dinner: self.serves_dinner.unwrap_or(false),
            serves_lunch: self.serves_lunch.unwrap_or(false),
            serves_wine: self.serves_wine.unwrap_or(false),
            takeout: self.takeout.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub relative_time_description: String,
}

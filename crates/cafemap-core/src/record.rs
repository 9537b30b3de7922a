//! The normalized café document written to the dataset, and its store key.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::regions::Region;

/// Placeholder stored when a place publishes no opening hours.
pub const WEEKDAY_TEXT_NOT_PROVIDED: &str = "not provided";

/// Service attributes reported by the place-details endpoint.
///
/// A flag missing from the upstream payload is `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    pub serves_beer: bool,
    pub serves_breakfast: bool,
    pub serves_brunch: bool,
    pub serves_dinner: bool,
    pub serves_lunch: bool,
    pub serves_wine: bool,
    pub takeout: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer_name: String,
    pub reviewer_rating: f64,
    pub review_text: String,
    pub review_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeRecord {
    pub city: String,
    pub district: String,
    pub formatted_address: String,
    pub formatted_phone_number: String,
    pub name: String,
    /// Upstream rating rounded to the nearest integer; `0` when absent.
    pub rating: i64,
    pub price_level: Option<i64>,
    pub services: ServiceFlags,
    pub types: Vec<String>,
    pub user_rating_total: u64,
    pub vicinity: String,
    pub place_id: String,
    pub weekday_text: Vec<String>,
    pub reviews: Vec<Review>,
}

/// Replaces `/` so a place name cannot introduce extra path segments.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.replace('/', "_")
}

/// Document id of a place inside a `category/city/district` collection.
#[must_use]
pub fn record_key(name: &str, place_id: &str) -> String {
    format!("{}_{place_id}", sanitize_name(name))
}

/// Full store path: `category/city/district/{sanitized_name}_{place_id}`.
#[must_use]
pub fn record_path(category: Category, region: &Region, name: &str, place_id: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        category.as_str(),
        region.city,
        region.district,
        record_key(name, place_id)
    )
}

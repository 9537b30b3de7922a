//! HTTP client for the Google Maps geocoding and places web services.
//!
//! Wraps `reqwest` with API key and language handling, bounded retry, and
//! typed decoding of the `{"status": ..., ...}` envelopes. The request URL is
//! stripped from transport errors because it carries the API key.

use std::time::Duration;

use cafemap_core::Region;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::grid::GridPoint;
use crate::retry::{is_transient_status, retry_with_backoff};
use crate::types::{
    BoundingBox, GeocodeResponse, NearbySearchResponse, PlaceCandidate, PlaceDetail,
    PlaceDetailsResponse,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Client for the geocode, nearby-search and place-details endpoints.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    language: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, language: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, language, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        language: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cafemap/0.1 (dataset-expansion)")
            .build()?;

        // Endpoint paths are joined onto the base, so it must end with a slash.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            language: language.to_owned(),
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Geocodes `{city}{district}` and returns its viewport.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::RegionNotFound`] if the status is not `OK` or there
    ///   are no results.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or
    ///   decoding failure.
    pub async fn resolve_region(&self, region: &Region) -> Result<BoundingBox, PlacesError> {
        let address = region.geocode_address();
        let url = self.build_url("geocode/json", &[("address", &address)])?;
        let context = format!("geocode(address={address})");
        let response: GeocodeResponse = self.get_envelope(&url, &context).await?;

        if response.status != "OK" {
            return Err(PlacesError::RegionNotFound {
                address,
                status: response.status,
            });
        }

        response
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.viewport)
            .ok_or_else(|| PlacesError::RegionNotFound {
                address,
                status: "ZERO_RESULTS".to_owned(),
            })
    }

    /// Radius search around `point`.
    ///
    /// Never fails: a transport error, malformed body or error status is
    /// logged with the point's coordinates and yields an empty list so the
    /// rest of the region can still be scanned.
    pub async fn search_nearby(
        &self,
        point: GridPoint,
        radius_m: u32,
        keyword: &str,
    ) -> Vec<PlaceCandidate> {
        match self.try_search_nearby(point, radius_m, keyword).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    lat = point.lat,
                    lng = point.lng,
                    error = %e,
                    "nearby search failed for grid point, skipping"
                );
                Vec::new()
            }
        }
    }

    /// Fallible form of [`PlacesClient::search_nearby`].
    ///
    /// `ZERO_RESULTS` is a successful empty search.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for any status other than `OK` or
    ///   `ZERO_RESULTS`.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or
    ///   decoding failure.
    pub async fn try_search_nearby(
        &self,
        point: GridPoint,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let location = format!("{},{}", point.lat, point.lng);
        let radius = radius_m.to_string();
        let url = self.build_url(
            "place/nearbysearch/json",
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        )?;
        let context = format!("nearbysearch(location={location})");
        let response: NearbySearchResponse = self.get_envelope(&url, &context).await?;

        match response.status.as_str() {
            "OK" => Ok(response.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(PlacesError::ApiStatus {
                endpoint: "nearbysearch",
                status: response.status,
                message: response.error_message,
            }),
        }
    }

    /// Fetches the details record for `place_id`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the status is present and not `OK`,
    ///   or the envelope has no `result`.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport or
    ///   decoding failure.
    pub async fn fetch_detail(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        let url = self.build_url("place/details/json", &[("place_id", place_id)])?;
        let context = format!("details(place_id={place_id})");
        let response: PlaceDetailsResponse = self.get_envelope(&url, &context).await?;

        let status = response.status.unwrap_or_else(|| "OK".to_owned());
        match (status.as_str(), response.result) {
            ("OK", Some(detail)) => Ok(detail),
            _ => Err(PlacesError::ApiStatus {
                endpoint: "details",
                status,
                message: response
                    .error_message
                    .or_else(|| Some("response has no result".to_owned())),
            }),
        }
    }

    /// Builds the request URL: endpoint path joined onto the base URL, then
    /// `extra` parameters, `language` and `key`, all percent-encoded.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("language", &self.language);
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// GETs `url` with retry and decodes the envelope into `T`.
    ///
    /// Transient API statuses (`OVER_QUERY_LIMIT`, `UNKNOWN_ERROR`) are
    /// surfaced as [`PlacesError::ApiStatus`] inside the retry loop so they
    /// are retried like 5xx responses.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.get_envelope_once(&url, context).await }
        })
        .await
    }

    async fn get_envelope_once<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let body = self.request_json(url, context).await?;

        if let Some(status) = body.get("status").and_then(serde_json::Value::as_str) {
            if is_transient_status(status) {
                return Err(PlacesError::ApiStatus {
                    endpoint: endpoint_name(url),
                    status: status.to_owned(),
                    message: body
                        .get("error_message")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned),
                });
            }
        }

        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends a GET request, asserts a 2xx status and parses the body as JSON.
    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        let response = response
            .error_for_status()
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn endpoint_name(url: &Url) -> &'static str {
    let path = url.path();
    if path.ends_with("geocode/json") {
        "geocode"
    } else if path.ends_with("nearbysearch/json") {
        "nearbysearch"
    } else if path.ends_with("details/json") {
        "details"
    } else {
        "places"
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

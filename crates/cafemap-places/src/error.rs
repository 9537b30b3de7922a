use thiserror::Error;

/// Errors returned by the places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    ///
    /// The request URL is stripped before wrapping so the API key never
    /// reaches logs.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoding returned a non-`OK` status or no results for the address.
    #[error("region not found for '{address}' (status {status})")]
    RegionNotFound { address: String, status: String },

    /// The API envelope carried a status other than `OK`.
    #[error("{endpoint} returned status {status}{}", .message.as_ref().map_or(String::new(), |m| format!(": {m}")))]
    ApiStatus {
        endpoint: &'static str,
        status: String,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

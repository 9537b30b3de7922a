pub mod client;
pub mod dedupe;
pub mod error;
pub mod grid;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::PlacesClient;
pub use dedupe::{dedupe_candidates, Deduplicator};
pub use error::PlacesError;
pub use grid::{GridPoint, GridPoints, GridSpec, DEFAULT_STEP_METERS, METERS_PER_LAT_DEGREE};
pub use normalize::build_cafe_record;
pub use types::{BoundingBox, LatLng, OpeningHours, PlaceCandidate, PlaceDetail, PlaceReview};

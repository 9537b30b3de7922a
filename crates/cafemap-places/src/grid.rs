//! Geographic grid over a geocoded viewport.
//!
//! Each point is the centre of one radius search. Longitude spacing is
//! scaled by the cosine of the box's mean latitude so columns stay roughly
//! `step_meters` apart on the ground.

use std::cmp::Ordering;

use crate::types::BoundingBox;

pub const METERS_PER_LAT_DEGREE: f64 = 111_000.0;
pub const DEFAULT_STEP_METERS: f64 = 1000.0;

/// Slack for float error when deciding whether the last row/column still
/// fits inside the box.
const EDGE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A fully computed grid. Cheap to copy; iterate with [`GridSpec::points`].
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    bounds: BoundingBox,
    lat_step: f64,
    lng_step: f64,
    rows: u64,
    cols: u64,
}

impl GridSpec {
    #[must_use]
    pub fn new(bounds: BoundingBox, step_meters: f64) -> Self {
        let sw = bounds.southwest;
        let ne = bounds.northeast;
        let mid_lat = (sw.lat + ne.lat) / 2.0;
        let lat_step = step_meters / METERS_PER_LAT_DEGREE;
        let lng_step = step_meters / (METERS_PER_LAT_DEGREE * mid_lat.to_radians().cos());

        Self {
            bounds,
            lat_step,
            lng_step,
            rows: steps_within(sw.lat, ne.lat, lat_step),
            cols: steps_within(sw.lng, ne.lng, lng_step),
        }
    }

    /// Latitude degrees between consecutive rows.
    #[must_use]
    pub fn lat_step(&self) -> f64 {
        self.lat_step
    }

    /// Longitude degrees between consecutive columns.
    #[must_use]
    pub fn lng_step(&self) -> f64 {
        self.lng_step
    }

    #[must_use]
    pub fn rows(&self) -> u64 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u64 {
        self.cols
    }

    /// Total number of points; always at least 1.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.rows.saturating_mul(self.cols)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// A fresh row-major iterator from the southwest corner.
    #[must_use]
    pub fn points(&self) -> GridPoints {
        GridPoints {
            spec: *self,
            next: 0,
        }
    }
}

/// Number of grid lines `start + i * step` (i ≥ 0) that do not pass `end`.
///
/// Degenerate ranges and unusable steps collapse to the single line at `start`.
fn steps_within(start: f64, end: f64, step: f64) -> u64 {
    if !step.is_finite() || step <= 0.0 || end.partial_cmp(&start) != Some(Ordering::Greater) {
        return 1;
    }
    let spans = ((end - start) / step + EDGE_EPSILON).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let spans = spans as u64;
    spans.saturating_add(1)
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Lazy row-major walk over a [`GridSpec`].
#[derive(Debug, Clone)]
pub struct GridPoints {
    spec: GridSpec,
    next: u64,
}

impl Iterator for GridPoints {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        if self.next >= self.spec.len() {
            return None;
        }
        let row = self.next / self.spec.cols;
        let col = self.next % self.spec.cols;
        self.next += 1;

        let sw = self.spec.bounds.southwest;
        #[allow(clippy::cast_precision_loss)]
        let (row, col) = (row as f64, col as f64);
        Some(GridPoint {
            lat: round6(sw.lat + row * self.spec.lat_step),
            lng: round6(sw.lng + col * self.spec.lng_step),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.spec.len() - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

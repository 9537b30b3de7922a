//! Dataset categories and the rules deciding which places belong to them.
//!
//! Each category is an independent top-level collection in the document
//! store; a place may qualify for any number of them.

use serde::{Deserialize, Serialize};

use crate::record::ServiceFlags;

/// Minimum search-summary rating for the `highRatings` category (inclusive).
pub const HIGH_RATING_THRESHOLD: f64 = 4.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "highRatings")]
    HighRatings,
    #[serde(rename = "serves_beer")]
    ServesBeer,
    #[serde(rename = "serves_brunch")]
    ServesBrunch,
    #[serde(rename = "serves_dinner")]
    ServesDinner,
    #[serde(rename = "takeout")]
    Takeout,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::HighRatings,
        Category::ServesBeer,
        Category::ServesBrunch,
        Category::ServesDinner,
        Category::Takeout,
    ];

    /// Collection name used as the first segment of every stored path.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::HighRatings => "highRatings",
            Category::ServesBeer => "serves_beer",
            Category::ServesBrunch => "serves_brunch",
            Category::ServesDinner => "serves_dinner",
            Category::Takeout => "takeout",
        }
    }

    /// Looks up a category by its collection name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Whether the decision depends on the place-details payload.
    ///
    /// `highRatings` is decided from the search summary alone.
    #[must_use]
    pub fn uses_detail(self) -> bool {
        !matches!(self, Category::HighRatings)
    }

    /// Whether a place qualifies for this category.
    ///
    /// `summary_rating` comes from the nearby-search result, not the details
    /// payload. A missing rating never qualifies for `highRatings`.
    #[must_use]
    pub fn qualifies(self, summary_rating: Option<f64>, services: &ServiceFlags) -> bool {
        match self {
            Category::HighRatings => {
                summary_rating.is_some_and(|rating| rating >= HIGH_RATING_THRESHOLD)
            }
            Category::ServesBeer => services.serves_beer,
            Category::ServesBrunch => services.serves_brunch,
            Category::ServesDinner => services.serves_dinner,
            Category::Takeout => services.takeout,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
            format!("unknown category '{s}'; expected one of {}", known.join(", "))
        })
    }
}

/// Classifies by category name. Names outside the fixed set never qualify.
#[must_use]
pub fn classify(category: &str, summary_rating: Option<f64>, services: &ServiceFlags) -> bool {
    Category::from_name(category).is_some_and(|c| c.qualifies(summary_rating, services))
}

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A (city, district) pair driving one geocode + grid-search cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub city: String,
    pub district: String,
}

impl Region {
    pub fn new(city: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            district: district.into(),
        }
    }

    /// Address string sent to the geocoder: city immediately followed by district.
    #[must_use]
    pub fn geocode_address(&self) -> String {
        format!("{}{}", self.city, self.district)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.district)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    pub districts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub cities: Vec<CityConfig>,
}

impl RegionsFile {
    /// Every configured region, cities in file order, districts in listed order.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        self.cities
            .iter()
            .flat_map(|city| {
                city.districts
                    .iter()
                    .map(move |district| Region::new(city.name.clone(), district.clone()))
            })
            .collect()
    }
}

/// Load and validate the regions list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_regions(&content)
}

fn parse_regions(content: &str) -> Result<RegionsFile, ConfigError> {
    let regions_file: RegionsFile = serde_yaml::from_str(content)?;
    validate_regions(&regions_file)?;
    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    let mut seen_cities = HashSet::new();

    for city in &regions_file.cities {
        validate_segment("city", &city.name)?;

        if !seen_cities.insert(city.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate city: '{}'",
                city.name
            )));
        }

        if city.districts.is_empty() {
            return Err(ConfigError::Validation(format!(
                "city '{}' has no districts",
                city.name
            )));
        }

        let mut seen_districts = HashSet::new();
        for district in &city.districts {
            validate_segment("district", district)?;
            if !seen_districts.insert(district.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate district '{district}' in city '{}'",
                    city.name
                )));
            }
        }
    }

    Ok(())
}

/// City and district names become store path segments.
fn validate_segment(kind: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{kind} name must be non-empty"
        )));
    }
    if value.contains('/') {
        return Err(ConfigError::Validation(format!(
            "{kind} name '{value}' must not contain '/'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "regions_test.rs"]
mod tests;

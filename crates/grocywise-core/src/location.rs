//! Country/city lookup table and the validated location selection.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AppConfig, ConfigError, CoreError};

/// One country and its ordered list of selectable cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryGroup {
    pub country: String,
    pub cities: Vec<String>,
}

/// Static directory mapping each country to its ordered cities.
///
/// Order matters: the first country is the default selection, and the
/// first city of a country is what a country change resets to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationDirectory {
    countries: Vec<CountryGroup>,
}

#[derive(Debug, Deserialize)]
struct LocationsFile {
    countries: Vec<CountryGroup>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "United Kingdom",
        &["London", "Manchester", "Birmingham", "Edinburgh"],
    ),
    (
        "USA",
        &[
            "New York",
            "San Francisco",
            "Chicago",
            "Los Angeles",
            "Austin",
            "Seattle",
        ],
    ),
    (
        "Canada",
        &[
            "Toronto",
            "Vancouver",
            "Montreal",
            "Ottawa",
            "Calgary",
            "Mississauga",
            "Markham",
            "Scarborough",
            "Oakville",
        ],
    ),
    ("Australia", &["Sydney", "Melbourne", "Brisbane", "Perth"]),
    ("Germany", &["Berlin", "Munich", "Hamburg", "Frankfurt"]),
    ("France", &["Paris", "Lyon", "Marseille"]),
    ("Japan", &["Tokyo", "Osaka", "Kyoto"]),
    ("Singapore", &["Singapore"]),
    ("UAE", &["Dubai", "Abu Dhabi"]),
    ("India", &["Mumbai", "Delhi", "Bangalore", "Chennai"]),
    ("Brazil", &["Sao Paulo", "Rio de Janeiro"]),
    ("South Africa", &["Cape Town", "Johannesburg"]),
    ("Mexico", &["Mexico City", "Guadalajara"]),
    ("Italy", &["Rome", "Milan", "Florence"]),
    ("Spain", &["Madrid", "Barcelona"]),
    ("South Korea", &["Seoul", "Busan"]),
];

impl LocationDirectory {
    /// The directory shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let countries = BUILTIN
            .iter()
            .map(|(country, cities)| CountryGroup {
                country: (*country).to_string(),
                cities: cities.iter().map(|c| (*c).to_string()).collect(),
            })
            .collect();
        Self { countries }
    }

    /// Load and validate a directory from a YAML file of the form
    /// `countries: [{ country: ..., cities: [...] }]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::LocationsFileIo {
                path: path.display().to_string(),
                source: e,
            })?;
        Self::from_yaml_str(&content)
    }

    /// The directory named by `GROCYWISE_LOCATIONS_PATH`, or the built-in
    /// table when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a configured file cannot be loaded.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match &config.locations_path {
            Some(path) => {
                let directory = Self::load(path)?;
                tracing::info!(
                    path = %path.display(),
                    countries = directory.countries.len(),
                    "loaded locations file"
                );
                Ok(directory)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Parse and validate a directory from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LocationsFileParse`] on malformed YAML and
    /// [`ConfigError::InvalidLocations`] when validation fails.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: LocationsFile = serde_yaml::from_str(content)?;
        let directory = Self {
            countries: file.countries,
        };
        directory.validate()?;
        Ok(directory)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.countries.is_empty() {
            return Err(ConfigError::InvalidLocations(
                "at least one country is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for group in &self.countries {
            if group.country.trim().is_empty() {
                return Err(ConfigError::InvalidLocations(
                    "country name must be non-empty".to_string(),
                ));
            }
            if !seen.insert(group.country.to_lowercase()) {
                return Err(ConfigError::InvalidLocations(format!(
                    "duplicate country: '{}'",
                    group.country
                )));
            }
            if group.cities.is_empty() {
                return Err(ConfigError::InvalidLocations(format!(
                    "country '{}' has no cities",
                    group.country
                )));
            }
            if group.cities.iter().any(|c| c.trim().is_empty()) {
                return Err(ConfigError::InvalidLocations(format!(
                    "country '{}' has an empty city name",
                    group.country
                )));
            }
        }

        Ok(())
    }

    /// All country groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[CountryGroup] {
        &self.countries
    }

    /// Country names in display order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|g| g.country.as_str())
    }

    /// Cities registered for `country`, or `None` for an unknown country.
    #[must_use]
    pub fn cities(&self, country: &str) -> Option<&[String]> {
        self.countries
            .iter()
            .find(|g| g.country == country)
            .map(|g| g.cities.as_slice())
    }

    /// First city of the first country.
    ///
    /// # Panics
    ///
    /// Does not panic: construction guarantees at least one country with at
    /// least one city.
    #[must_use]
    pub fn default_selection(&self) -> LocationSelector {
        let group = &self.countries[0];
        LocationSelector {
            country: group.country.clone(),
            city: group.cities[0].clone(),
        }
    }
}

impl Default for LocationDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A country plus one of its registered cities.
///
/// Only constructible through the directory, so `city` always belongs to
/// `country`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSelector {
    country: String,
    city: String,
}

impl LocationSelector {
    /// Validate a country/city pair against `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCountry`] or [`CoreError::CityNotInCountry`].
    pub fn new(directory: &LocationDirectory, country: &str, city: &str) -> Result<Self, CoreError> {
        let cities = directory
            .cities(country)
            .ok_or_else(|| CoreError::UnknownCountry(country.to_string()))?;

        if !cities.iter().any(|c| c == city) {
            return Err(CoreError::CityNotInCountry {
                country: country.to_string(),
                city: city.to_string(),
            });
        }

        Ok(Self {
            country: country.to_string(),
            city: city.to_string(),
        })
    }

    /// Select `country` with its first listed city.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCountry`] if the country is not in the directory.
    pub fn for_country(directory: &LocationDirectory, country: &str) -> Result<Self, CoreError> {
        let first = directory
            .cities(country)
            .and_then(<[String]>::first)
            .ok_or_else(|| CoreError::UnknownCountry(country.to_string()))?;

        Ok(Self {
            country: country.to_string(),
            city: first.clone(),
        })
    }

    /// Switch country; the city resets to that country's first city.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCountry`] and leaves the selection unchanged
    /// if the country is not in the directory.
    pub fn select_country(
        &mut self,
        directory: &LocationDirectory,
        country: &str,
    ) -> Result<(), CoreError> {
        *self = Self::for_country(directory, country)?;
        Ok(())
    }

    /// Switch city within the current country.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CityNotInCountry`] and leaves the selection
    /// unchanged if the city is not registered for the current country.
    pub fn select_city(&mut self, directory: &LocationDirectory, city: &str) -> Result<(), CoreError> {
        *self = Self::new(directory, &self.country, city)?;
        Ok(())
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for LocationSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;

//! Domain types and pure logic shared by the `GrocyWise` crates.
//!
//! Holds the location directory and filter catalogs consumed by the
//! presentation layer, the market report records returned by the query
//! pipeline, and the numeric helpers that turn free-form price strings into
//! a lowest-cost ranking and chart series.

pub mod app_config;
pub mod chart;
pub mod config;
pub mod currency;
pub mod filters;
pub mod lenient;
pub mod location;
pub mod ranking;
pub mod report;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use chart::{chart_series, ChartPoint};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_SEARCH_RATE_LIMIT};
pub use currency::parse_amount;
pub use filters::{FilterCategory, FilterSet, CUISINES, DIETARY_RESTRICTIONS, FOOD_GROUPS};
pub use location::{CountryGroup, LocationDirectory, LocationSelector};
pub use ranking::{lowest_index, rank_comparisons};
pub use report::{
    GroundingSource, ProduceDeal, QueryResult, SearchAffordance, ShoppingLineItem,
    StoreCategory, StoreComparison, StoreProfile,
};

/// Errors raised by domain invariants (location selection, filter labels).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    #[error("city \"{city}\" is not registered for {country}")]
    CityNotInCountry { country: String, city: String },

    #[error("filter labels must not be empty")]
    EmptyFilterLabel,
}

/// Errors raised while loading configuration or the locations file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read locations file {path}: {source}")]
    LocationsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locations file: {0}")]
    LocationsFileParse(#[from] serde_yaml::Error),

    #[error("invalid locations table: {0}")]
    InvalidLocations(String),
}

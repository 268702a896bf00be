//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather geocoding/forecast client
//! - The aggregation pipeline that reduces raw 3-hour samples into a
//!   per-city table of four complete days of min/max plus averages
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod summary;

pub use aggregate::SummaryRow;
pub use config::Config;
pub use error::ForecastError;
pub use model::{ForecastSample, GeoCoordinate};
pub use provider::{ForecastProvider, openweather::OpenWeatherProvider};

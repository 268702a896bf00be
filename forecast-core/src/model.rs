use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Coordinate of a resolved city, taken from the first geocoding candidate.
/// Immutable once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One 3-hour forecast window for a city, in Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub city: String,
    /// Window timestamp as returned by the provider, timezone kept as-is.
    pub timestamp: NaiveDateTime,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl ForecastSample {
    /// Calendar date the window falls on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

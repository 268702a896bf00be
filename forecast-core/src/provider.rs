use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    error::ForecastError,
    model::{ForecastSample, GeoCoordinate},
};

pub mod openweather;

/// Upstream weather service: geocoding plus block-forecast retrieval.
/// Implementations do no caching and no retrying; every failure is returned
/// to the caller, which aborts the run.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Resolve a city query to the coordinate of its first geocoding
    /// candidate.
    async fn resolve_city(&self, city: &str) -> Result<GeoCoordinate, ForecastError>;

    /// Retrieve the full forecast horizon for a coordinate. Samples come
    /// back tagged with `city` so they can be merged across cities.
    async fn fetch_forecast(
        &self,
        city: &str,
        coord: GeoCoordinate,
    ) -> Result<Vec<ForecastSample>, ForecastError>;
}

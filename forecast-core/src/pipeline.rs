use futures::stream::{self, StreamExt, TryStreamExt};

use crate::{
    aggregate, error::ForecastError, model::ForecastSample, provider::ForecastProvider, summary,
};

/// Resolve and fetch every city, at most `concurrency` cities in flight at
/// once. Per-city data shares nothing until the merge here, so the fetches
/// need no locking; any single failure aborts the whole collection.
pub async fn collect_samples(
    provider: &dyn ForecastProvider,
    cities: &[String],
    concurrency: usize,
) -> Result<Vec<ForecastSample>, ForecastError> {
    let per_city: Vec<Vec<ForecastSample>> = stream::iter(cities.iter().map(|city| async move {
        let coord = provider.resolve_city(city).await?;
        provider.fetch_forecast(city, coord).await
    }))
    .buffer_unordered(concurrency.max(1))
    .try_collect()
    .await?;

    Ok(per_city.into_iter().flatten().collect())
}

/// Full pipeline: dedup the city list, collect all samples, aggregate, and
/// render the ordered table (data rows only, see [`summary::HEADER`] for the
/// column names). Aggregation starts only once every fetch has finished,
/// since ranking needs each city's whole sample set.
pub async fn run(
    provider: &dyn ForecastProvider,
    cities: &[String],
    concurrency: usize,
) -> Result<Vec<Vec<String>>, ForecastError> {
    let distinct = summary::dedup_cities(cities);
    tracing::info!(cities = distinct.len(), "collecting forecasts");

    let samples = collect_samples(provider, &distinct, concurrency).await?;
    let rows = aggregate::summarize(&samples);

    Ok(summary::render_table(&rows, &distinct))
}

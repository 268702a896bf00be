use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use super::ForecastProvider;
use crate::{
    error::ForecastError,
    model::{ForecastSample, GeoCoordinate},
};

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// Timestamp format of the forecast `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the provider at a different host, e.g. a mock server in tests
    /// or a proxy configured in the config file.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_body(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String, ForecastError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ForecastError::Http { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ForecastError::Http { endpoint, source })?;

        if !status.is_success() {
            return Err(ForecastError::Transport {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn resolve_city(&self, city: &str) -> Result<GeoCoordinate, ForecastError> {
        tracing::debug!(city, "resolving city");

        let body = self
            .get_body(
                "geocoding",
                "/geo/1.0/direct",
                &[("q", city), ("limit", "5"), ("appid", self.api_key.as_str())],
            )
            .await?;

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|_| ForecastError::MalformedResolution { city: city.to_string() })?;
        let candidates = value
            .as_array()
            .ok_or_else(|| ForecastError::MalformedResolution { city: city.to_string() })?;
        if candidates.is_empty() {
            return Err(ForecastError::EmptyResolution { city: city.to_string() });
        }

        // First candidate wins; no disambiguation beyond that.
        serde_json::from_value(candidates[0].clone())
            .map_err(|_| ForecastError::MalformedResolution { city: city.to_string() })
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        coord: GeoCoordinate,
    ) -> Result<Vec<ForecastSample>, ForecastError> {
        tracing::debug!(city, lat = coord.lat, lon = coord.lon, "fetching forecast");

        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();
        let body = self
            .get_body(
                "forecast",
                "/data/2.5/forecast",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", "metric"),
                    ("appid", self.api_key.as_str()),
                ],
            )
            .await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|source| ForecastError::Decode { endpoint: "forecast", source })?;

        let mut samples = Vec::with_capacity(parsed.list.len());
        for entry in parsed.list {
            let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)?;
            samples.push(ForecastSample {
                city: city.to_string(),
                timestamp,
                temp_min: entry.main.temp_min,
                temp_max: entry.main.temp_max,
            });
        }

        tracing::debug!(city, samples = samples.len(), "forecast retrieved");
        Ok(samples)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a char boundary so multi-byte bodies can't panic the cut.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

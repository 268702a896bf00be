use thiserror::Error;

/// Fatal pipeline failures. Any of these aborts the whole run; a city that
/// merely lacks four complete forecast days is not an error and is dropped
/// silently during aggregation.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Non-success HTTP status from either endpoint.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Transport {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// Geocoding answered but matched no locations.
    #[error("no geocoding candidates found for '{city}'")]
    EmptyResolution { city: String },

    /// Geocoding body was not a list of candidate objects.
    #[error("geocoding response for '{city}' is not a candidate list")]
    MalformedResolution { city: String },

    #[error("failed to call {endpoint} endpoint")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {endpoint} response")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid forecast timestamp")]
    Timestamp(#[from] chrono::ParseError),
}

impl ForecastError {
    /// Process exit code for the failure. The binary is the only place that
    /// terminates; library code always returns the error upward.
    pub fn exit_code(&self) -> i32 {
        match self {
            ForecastError::EmptyResolution { .. } => 2,
            ForecastError::MalformedResolution { .. } => 3,
            _ => 1,
        }
    }
}

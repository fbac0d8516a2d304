use reqwest::StatusCode;

/// Errors produced by the OpenWeather client and the fetch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The weather-by-name endpoint rejected the query. Any non-2xx status
    /// on that endpoint is reported as an unknown city.
    #[error("city not found: {city}")]
    NotFound { city: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-2xx status on the geocoding or forecast endpoints.
    #[error("unexpected response status: {0}")]
    Status(StatusCode),
}

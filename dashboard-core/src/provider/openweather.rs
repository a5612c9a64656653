use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{error::FetchError, model::WeatherReading};

use super::WeatherSource;

pub const CURRENT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Temperatures in °F.
const UNITS: &str = "imperial";

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient").field("endpoint", &self.endpoint).finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            endpoint: CURRENT_WEATHER_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReading, FetchError> {
        debug!(city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::transport)?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        WeatherReading::from_json(&body).map_err(FetchError::Decode)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let result = self.fetch_current(city).await;
        if let Err(err) = &result {
            warn!(city, error = %err, "error fetching weather data");
        }
        result
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

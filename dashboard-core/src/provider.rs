use crate::{Config, FetchError, WeatherReading, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Something that can report the current weather for a city.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<WeatherReading, FetchError>;
}

/// Construct the OpenWeather client from config.
///
/// A missing API key is not rejected here: requests go out without a usable
/// key and each city fails with the API's authentication error.
pub fn source_from_config(config: &Config) -> Box<dyn WeatherSource> {
    let api_key = config.api_key().unwrap_or_else(|| {
        tracing::warn!(
            "no OpenWeather API key configured; set {} or run `weather-dashboard configure`",
            crate::config::API_KEY_ENV
        );
        ""
    });

    Box::new(OpenWeatherClient::new(api_key.to_owned()).with_endpoint(config.endpoint()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_built_without_api_key() {
        let source = source_from_config(&Config::default());
        assert!(format!("{source:?}").contains("OpenWeatherClient"));
    }
}

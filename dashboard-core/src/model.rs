use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchError;

/// `strftime` pattern of the capture timestamp, e.g. `20250114-093005`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Key prefix shared by every stored reading.
pub const BLOB_PREFIX: &str = "weather-data";

/// Name of the field added to each reading before it is stored.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A current-weather response, kept exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherReading(Map<String, Value>);

/// The part of a reading shown on the console.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub description: String,
}

/// Where an uploaded reading ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub container: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl WeatherReading {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Validate the nested fields the report reads and extract them.
    pub fn conditions(&self) -> Result<Conditions, FetchError> {
        let parsed = OwCurrent::deserialize(&Value::Object(self.0.clone()))
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| FetchError::Malformed("`weather` array is empty".to_string()))?;

        Ok(Conditions {
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity: parsed.main.humidity,
            description,
        })
    }

    /// Add the capture timestamp. An existing `timestamp` field is replaced in place.
    pub fn stamp(&mut self, timestamp: &str) {
        self.0.insert(TIMESTAMP_FIELD.to_string(), Value::String(timestamp.to_string()));
    }
}

pub fn capture_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn blob_key(city: &str, timestamp: &str) -> String {
    format!("{BLOB_PREFIX}/{city}-{timestamp}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    const SEATTLE: &str = r#"{"main":{"temp":55,"feels_like":52,"humidity":80},"weather":[{"description":"light rain"}]}"#;

    #[test]
    fn conditions_are_extracted_from_nested_fields() {
        let reading = WeatherReading::from_json(SEATTLE).unwrap();
        let conditions = reading.conditions().unwrap();

        assert_eq!(conditions.temperature, 55.0);
        assert_eq!(conditions.feels_like, 52.0);
        assert_eq!(conditions.humidity, 80.0);
        assert_eq!(conditions.description, "light rain");
        assert_eq!(conditions.temperature.to_string(), "55");
    }

    #[test]
    fn missing_weather_array_is_malformed() {
        let reading = WeatherReading::from_json(r#"{"main":{"temp":1,"feels_like":1,"humidity":1}}"#).unwrap();
        let err = reading.conditions().unwrap_err();

        assert!(matches!(err, FetchError::Malformed(ref m) if m.contains("weather")));
    }

    #[test]
    fn empty_weather_array_is_malformed() {
        let reading = WeatherReading::from_json(
            r#"{"main":{"temp":1,"feels_like":1,"humidity":1},"weather":[]}"#,
        )
        .unwrap();

        assert!(matches!(reading.conditions(), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(WeatherReading::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn stamp_appends_field_and_keeps_everything_else() {
        let mut reading = WeatherReading::from_json(SEATTLE).unwrap();
        reading.stamp("20250114-093005");

        let stored = serde_json::to_value(&reading).unwrap();
        let mut expected: Value = serde_json::from_str(SEATTLE).unwrap();
        expected["timestamp"] = json!("20250114-093005");

        assert_eq!(stored, expected);
        let keys: Vec<_> = reading.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, ["main", "weather", "timestamp"]);
    }

    #[test]
    fn key_embeds_city_and_capture_time() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap().and_hms_opt(7, 3, 9).unwrap();
        let ts = capture_timestamp(at);

        assert_eq!(ts, "20250104-070309");
        assert_eq!(blob_key("Seattle", &ts), "weather-data/Seattle-20250104-070309.json");
    }
}

//! Weather handler - OpenWeatherMap current conditions.

use super::text_at;
use crate::fetch::{FetchError, FetchRequest, JsonFetcher};
use serde_json::Value;

pub const OPENWEATHER_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Placeholder key shipped in sample configs
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Provider settings for the weather handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSettings {
    pub endpoint: String,
    pub api_key: String,
    /// OpenWeatherMap unit system: metric, imperial or standard
    pub units: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            endpoint: OPENWEATHER_ENDPOINT.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            units: "metric".to_string(),
        }
    }
}

impl WeatherSettings {
    /// False when the key is empty or still the placeholder
    pub fn has_api_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    fn temperature_unit(&self) -> &'static str {
        match self.units.as_str() {
            "imperial" => "°F",
            "standard" => "K",
            _ => "°C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    /// The provider answered but reported a failure (bad key, unknown city)
    #[error("Error: {0}.")]
    Provider(String),

    #[error("Error fetching weather: {0}")]
    Fetch(FetchError),

    #[error("Error fetching weather: unexpected response, missing {0}")]
    Malformed(&'static str),
}

/// Current weather for `location` as a display sentence
pub fn fetch_weather(
    fetcher: &dyn JsonFetcher,
    settings: &WeatherSettings,
    location: &str,
) -> Result<String, WeatherError> {
    let request = FetchRequest::new(settings.endpoint.as_str())
        .with_query("q", location)
        .with_query("appid", settings.api_key.as_str())
        .with_query("units", settings.units.as_str());

    let data = match fetcher.get_json(&request) {
        Ok(data) => data,
        Err(FetchError::Status {
            body: Some(body), ..
        }) => return Err(provider_error(&body)),
        Err(e) => return Err(WeatherError::Fetch(e)),
    };

    if !reports_success(&data) {
        return Err(provider_error(&data));
    }

    let description = text_at(&data, "/weather/0/description")
        .ok_or(WeatherError::Malformed("weather[0].description"))?;
    let temperature = text_at(&data, "/main/temp").ok_or(WeatherError::Malformed("main.temp"))?;

    Ok(format!(
        "Weather in {}: {}, temperature {}{}.",
        location,
        description,
        temperature,
        settings.temperature_unit()
    ))
}

/// OpenWeatherMap echoes the HTTP code as `cod`, sometimes as a string
fn reports_success(data: &Value) -> bool {
    match data.get("cod") {
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(Value::String(s)) => s == "200",
        _ => false,
    }
}

fn provider_error(data: &Value) -> WeatherError {
    let message = text_at(data, "/message").unwrap_or_else(|| "Unknown error".to_string());
    WeatherError::Provider(message)
}

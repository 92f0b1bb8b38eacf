//! Remote data handlers - weather and public fact APIs.
//!
//! Each handler returns `Result<String, E>` where the error's `Display` is
//! already the degraded, user-facing text. The dispatcher folds both sides
//! into a plain string.

pub mod facts;
pub mod weather;

pub use facts::{fetch_fact, FactError, FactTopic};
pub use weather::{fetch_weather, WeatherError, WeatherSettings};

use serde_json::Value;

/// Render a JSON scalar the way it would read in a sentence
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Look up a JSON pointer and render it as text
pub(crate) fn text_at(json: &Value, pointer: &str) -> Option<String> {
    json.pointer(pointer).and_then(scalar_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_at() {
        let doc = json!({"main": {"temp": 15.5}, "weather": [{"description": "light rain"}], "cod": 200});
        assert_eq!(text_at(&doc, "/main/temp").as_deref(), Some("15.5"));
        assert_eq!(text_at(&doc, "/weather/0/description").as_deref(), Some("light rain"));
        assert_eq!(text_at(&doc, "/cod").as_deref(), Some("200"));
        assert_eq!(text_at(&doc, "/weather").as_deref(), None);
        assert_eq!(text_at(&doc, "/missing").as_deref(), None);
    }
}

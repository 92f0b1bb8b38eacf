//! Location extraction for weather queries.
//!
//! Positional heuristic, not a geocoder: the token right after a trigger
//! word is taken as the place name. Prepositions ("in", "at", "for") are
//! looked for first, weather nouns only when no preposition is followed by
//! a token. Only one token is captured, so "weather in New York" yields "New".

/// Used when no trigger word is followed by a token
pub const DEFAULT_LOCATION: &str = "London";

const PREPOSITIONS: &[&str] = &["in", "at", "for"];
const WEATHER_NOUNS: &[&str] = &["weather", "temperature", "forecast"];
const TRIM_CHARS: &[char] = &['?', '.', '!'];

/// Extract a location, falling back to [`DEFAULT_LOCATION`]
pub fn extract_location(query: &str) -> String {
    extract_location_or(query, DEFAULT_LOCATION)
}

/// Extract a location, falling back to `default`
pub fn extract_location_or(query: &str, default: &str) -> String {
    let words: Vec<&str> = query.split_whitespace().collect();

    [PREPOSITIONS, WEATHER_NOUNS]
        .iter()
        .find_map(|triggers| token_after(&words, triggers))
        .map(|token| token.trim_matches(TRIM_CHARS).to_string())
        .unwrap_or_else(|| default.to_string())
}

/// First token that follows one of `triggers`, scanning left to right
fn token_after<'a>(words: &[&'a str], triggers: &[&str]) -> Option<&'a str> {
    words.windows(2).find_map(|pair| {
        let lower = pair[0].to_lowercase();
        triggers.contains(&lower.as_str()).then_some(pair[1])
    })
}

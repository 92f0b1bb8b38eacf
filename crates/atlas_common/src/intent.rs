//! Intent classifier - deterministic keyword routing.
//!
//! Every query lands on exactly one intent. Rules are checked in order and
//! the first rule with a matching keyword wins; anything left over is math.
//! Matching is plain substring containment on the lower-cased query, so
//! "catastrophe" counts as a "cat" query and "rainbow" as a "rain" query.


/// Which handler serves a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Current weather for a location
    Weather,
    /// Quotes, jokes, animal facts and other free public APIs
    RemoteFact,
    /// Arithmetic, explicit or synthesized
    Math,
}

impl Intent {
    /// Handler label reported back to the caller
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Weather => "Weather Agent",
            Intent::RemoteFact => "API Agent",
            Intent::Math => "Math Agent",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Weather => "weather",
            Self::RemoteFact => "remote_fact",
            Self::Math => "math",
        };
        write!(f, "{}", s)
    }
}

pub const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "forecast",
    "climate",
    "rain",
    "snow",
    "sunny",
    "cloudy",
    "wind",
];

pub const REMOTE_FACT_KEYWORDS: &[&str] = &[
    "quote", "joke", "fact", "advice", "cat", "dog", "user", "api", "data", "fetch",
];

/// Ordered routing table. Weather must stay ahead of remote facts.
const RULES: &[(&[&str], Intent)] = &[
    (WEATHER_KEYWORDS, Intent::Weather),
    (REMOTE_FACT_KEYWORDS, Intent::RemoteFact),
];

/// Classify a raw query. Total over every input, including "".
pub fn classify(query: &str) -> Intent {
    let lower = query.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| contains_any(&lower, keywords))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Math)
}

/// True when any keyword occurs anywhere in `lower`
pub(crate) fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_queries() {
        assert_eq!(classify("What's the weather in London?"), Intent::Weather);
        assert_eq!(classify("TEMPERATURE in Paris"), Intent::Weather);
        assert_eq!(classify("will it snow tomorrow"), Intent::Weather);
        assert_eq!(classify("is it windy"), Intent::Weather);
    }

    #[test]
    fn test_weather_wins_over_facts() {
        // "fact" and "weather" both present - weather is checked first
        assert_eq!(classify("give me a weather fact"), Intent::Weather);
        assert_eq!(classify("tell a joke about rain"), Intent::Weather);
    }

    #[test]
    fn test_remote_fact_queries() {
        assert_eq!(classify("tell me a joke"), Intent::RemoteFact);
        assert_eq!(classify("Give me a QUOTE"), Intent::RemoteFact);
        assert_eq!(classify("random dog fact"), Intent::RemoteFact);
        assert_eq!(classify("fetch something"), Intent::RemoteFact);
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(classify("what a catastrophe"), Intent::RemoteFact);
        assert_eq!(classify("look at the rainbow"), Intent::Weather);
    }

    #[test]
    fn test_math_fallthrough() {
        assert_eq!(classify("Calculate 15 + 25"), Intent::Math);
        assert_eq!(classify("Compute something interesting"), Intent::Math);
        assert_eq!(classify(""), Intent::Math);
        assert_eq!(classify("   "), Intent::Math);
    }

    #[test]
    fn test_classify_is_repeatable() {
        let queries = ["weather in Oslo", "cat", "2 * 3", ""];
        let first: Vec<Intent> = queries.iter().map(|q| classify(q)).collect();
        for _ in 0..3 {
            let again: Vec<Intent> = queries.iter().rev().map(|q| classify(q)).collect();
            let again: Vec<Intent> = again.into_iter().rev().collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Intent::Weather.label(), "Weather Agent");
        assert_eq!(Intent::RemoteFact.label(), "API Agent");
        assert_eq!(Intent::Math.label(), "Math Agent");
        assert_eq!(Intent::RemoteFact.to_string(), "remote_fact");
    }
}

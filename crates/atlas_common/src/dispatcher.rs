//! Dispatcher - the single entry point the outer layers call.
//!
//! classify -> pick handler -> (response text, handler label). Every path
//! ends in a string; nothing escapes as an error.

use crate::arithmetic::{self, MathProblem};
use crate::config::AtlasConfig;
use crate::expression::extract_expressions;
use crate::fetch::{HttpJsonFetcher, JsonFetcher};
use crate::intent::{classify, Intent};
use crate::location::extract_location_or;
use crate::random::{RandomSource, SharedRandom};
use crate::remote::{fetch_fact, fetch_weather, WeatherSettings};
use anyhow::Result;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Response for a blank query
pub const EMPTY_QUERY_RESPONSE: &str = "No query provided";

/// Query used by the sample endpoint
pub const SAMPLE_FACT_QUERY: &str = "random fact";

/// Outcome of one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub response: String,
    pub intent: Intent,
}

impl DispatchResult {
    /// Handler label, e.g. "Math Agent"
    pub fn label(&self) -> &'static str {
        self.intent.label()
    }
}

pub struct Dispatcher {
    fetcher: Arc<dyn JsonFetcher>,
    random: Arc<dyn RandomSource>,
    weather: WeatherSettings,
    default_location: String,
}

impl Dispatcher {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        random: Arc<dyn RandomSource>,
        weather: WeatherSettings,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            random,
            weather,
            default_location: default_location.into(),
        }
    }

    /// Production wiring: real HTTP client, entropy-seeded random source
    pub fn from_config(config: &AtlasConfig) -> Result<Self> {
        let fetcher = HttpJsonFetcher::new(config.remote.timeout_secs)?;
        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(SharedRandom::new()),
            config.weather_settings(),
            config.weather.default_location.clone(),
        ))
    }

    /// Classify and answer one query
    pub fn handle(&self, query: &str) -> DispatchResult {
        if query.trim().is_empty() {
            return DispatchResult {
                response: EMPTY_QUERY_RESPONSE.to_string(),
                intent: Intent::Math,
            };
        }

        let intent = classify(query);
        debug!("Classified query as {}", intent);

        let response = match intent {
            Intent::Weather => {
                let location = extract_location_or(query, &self.default_location);
                self.weather_report(&location)
            }
            Intent::RemoteFact => self.fact(query),
            Intent::Math => arithmetic::answer(extract_expressions(query), self.random.as_ref()),
        };

        DispatchResult { response, intent }
    }

    /// Weather for an explicit location
    pub fn weather_report(&self, location: &str) -> String {
        degrade(
            "weather",
            fetch_weather(self.fetcher.as_ref(), &self.weather, location),
        )
    }

    /// A synthesized math problem
    pub fn random_problem(&self) -> String {
        MathProblem::generate(self.random.as_ref()).to_string()
    }

    /// A random trivia fact
    pub fn sample_fact(&self) -> String {
        self.fact(SAMPLE_FACT_QUERY)
    }

    fn fact(&self, query: &str) -> String {
        degrade(
            "facts",
            fetch_fact(self.fetcher.as_ref(), self.random.as_ref(), query),
        )
    }
}

/// Fold a handler result into display text
fn degrade<E: Display>(handler: &str, result: Result<String, E>) -> String {
    result.unwrap_or_else(|e| {
        let message = e.to_string();
        warn!("{} handler degraded: {}", handler, message);
        message
    })
}

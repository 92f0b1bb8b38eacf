//! Fact handler - quotes, jokes, animal facts, users, advice, trivia.
//!
//! A second, finer keyword pass picks the provider. Same rules as the
//! intent classifier: ordered, substring match, first hit wins.

use super::text_at;
use crate::fetch::{FetchError, FetchRequest, JsonFetcher};
use crate::intent::contains_any;
use crate::random::RandomSource;
use serde_json::Value;

pub const CAPABILITIES_MENU: &str = "🔌 I can fetch data from various APIs! Try asking for: quotes, jokes, cat facts, dog facts, user data, advice, or random facts.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactTopic {
    Quote,
    Joke,
    CatFact,
    DogFact,
    RandomUser,
    Advice,
    Trivia,
}

const TOPIC_RULES: &[(&[&str], FactTopic)] = &[
    (&["quote", "inspiration", "motivate"], FactTopic::Quote),
    (&["joke", "funny", "laugh"], FactTopic::Joke),
    (&["cat", "feline"], FactTopic::CatFact),
    (&["dog", "puppy"], FactTopic::DogFact),
    (&["user", "person", "profile"], FactTopic::RandomUser),
    (&["advice", "tip", "suggest"], FactTopic::Advice),
    (&["fact", "trivia", "knowledge"], FactTopic::Trivia),
];

impl FactTopic {
    /// Pick the provider for a query, `None` when nothing matches
    pub fn detect(query: &str) -> Option<Self> {
        let lower = query.to_lowercase();
        TOPIC_RULES
            .iter()
            .find(|(keywords, _)| contains_any(&lower, keywords))
            .map(|(_, topic)| *topic)
    }

    fn request(&self, random: &dyn RandomSource) -> FetchRequest {
        match self {
            Self::Quote => FetchRequest::new("https://api.quotable.io/random"),
            Self::Joke => FetchRequest::new("https://icanhazdadjoke.com/")
                .with_header("Accept", "application/json"),
            Self::CatFact => FetchRequest::new("https://catfact.ninja/fact"),
            Self::DogFact => FetchRequest::new("https://dogapi.dog/api/v2/facts"),
            Self::RandomUser => {
                let user_id = random.int_between(1, 10);
                FetchRequest::new(format!("https://jsonplaceholder.typicode.com/users/{}", user_id))
            }
            Self::Advice => FetchRequest::new("https://api.adviceslip.com/advice"),
            Self::Trivia => FetchRequest::new("https://uselessfacts.jsph.pl/random.json")
                .with_query("language", "en"),
        }
    }

    fn render(&self, data: &Value) -> Result<String, FactError> {
        let text = match self {
            Self::Quote => format!(
                "💡 Quote: \"{}\" - {}",
                field(data, "/content")?,
                field(data, "/author")?
            ),
            Self::Joke => format!("😄 Here's a joke: {}", field(data, "/joke")?),
            Self::CatFact => format!("🐱 Cat Fact: {}", field(data, "/fact")?),
            Self::DogFact => format!("🐶 Dog Fact: {}", field(data, "/data/0/attributes/body")?),
            Self::RandomUser => format!(
                "👤 Random User: {} ({}) from {}",
                field(data, "/name")?,
                field(data, "/email")?,
                field(data, "/address/city")?
            ),
            Self::Advice => format!("💭 Advice: {}", field(data, "/slip/advice")?),
            Self::Trivia => format!("🤓 Random Fact: {}", field(data, "/text")?),
        };
        Ok(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactError {
    #[error("⏰ API request timed out. Please try again.")]
    Timeout,

    #[error("🚫 API Error: Unable to fetch data. ({0})")]
    Unavailable(String),

    #[error("❌ Unexpected error: {0}")]
    Unexpected(String),
}

impl From<FetchError> for FactError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout(_) => FactError::Timeout,
            FetchError::Transport(_) | FetchError::Status { .. } => {
                FactError::Unavailable(e.to_string())
            }
            FetchError::InvalidJson(_) => FactError::Unexpected(e.to_string()),
        }
    }
}

fn field(data: &Value, pointer: &str) -> Result<String, FactError> {
    text_at(data, pointer).ok_or_else(|| {
        FactError::Unexpected(format!(
            "missing field '{}'",
            pointer.trim_start_matches('/').replace('/', ".")
        ))
    })
}

/// Fetch a fact matching the query, or the capabilities menu
pub fn fetch_fact(
    fetcher: &dyn JsonFetcher,
    random: &dyn RandomSource,
    query: &str,
) -> Result<String, FactError> {
    let Some(topic) = FactTopic::detect(query) else {
        return Ok(CAPABILITIES_MENU.to_string());
    };

    tracing::debug!("Fact topic: {:?}", topic);

    let data = fetcher.get_json(&topic.request(random))?;
    topic.render(&data)
}

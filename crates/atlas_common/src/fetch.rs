//! Outbound JSON fetching.
//!
//! Remote handlers never talk to reqwest directly; they go through
//! [`JsonFetcher`] so tests can swap in [`FakeJsonFetcher`].

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// A GET request for a JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    /// Value of a query parameter, if set
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("request failed: {0}")]
    Transport(String),

    /// Non-2xx status. The body is kept when it parsed as JSON, since some
    /// providers put the real reason there.
    #[error("HTTP {status}")]
    Status { status: u16, body: Option<Value> },

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),
}

pub trait JsonFetcher: Send + Sync {
    fn get_json(&self, request: &FetchRequest) -> Result<Value, FetchError>;
}

/// Blocking reqwest client with a bounded timeout. No retries.
pub struct HttpJsonFetcher {
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpJsonFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("atlas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

impl JsonFetcher for HttpJsonFetcher {
    fn get_json(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        tracing::debug!("GET {}", request.url);

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().ok();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::InvalidJson(e.to_string())
            }
        })
    }
}

/// Canned responses keyed by URL, for tests
pub struct FakeJsonFetcher {
    responses: Mutex<HashMap<String, Result<Value, FetchError>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl FakeJsonFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request to `url` with `json`
    pub fn with_response(self, url: &str, json: Value) -> Self {
        self.set(url, Ok(json));
        self
    }

    /// Fail every request to `url` with `error`
    pub fn with_error(self, url: &str, error: FetchError) -> Self {
        self.set(url, Err(error));
        self
    }

    fn set(&self, url: &str, result: Result<Value, FetchError>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), result);
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for FakeJsonFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFetcher for FakeJsonFetcher {
    fn get_json(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Transport(format!(
                    "no canned response for {}",
                    request.url
                )))
            })
    }
}

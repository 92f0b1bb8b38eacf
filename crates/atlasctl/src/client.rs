//! HTTP client for communicating with atlasd.

use anyhow::{anyhow, Context, Result};
use atlas_common::{ErrorResponse, QueryRequest, QueryResponse};
use reqwest::StatusCode;
use std::time::Duration;

/// Covers the daemon's own outbound calls plus some slack
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the atlasd JSON API
pub struct AtlasClient {
    http: reqwest::Client,
    base_url: String,
}

impl AtlasClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST /api/query
    pub async fn query(&self, query: &str) -> Result<QueryResponse> {
        let url = format!("{}/api/query", self.base_url);
        let body = QueryRequest {
            query: Some(query.to_string()),
        };

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            anyhow!(
                "Cannot reach atlasd at {}: {}\n\n\
                 Start the daemon with `atlasd`, or pass --local to route in-process.",
                self.base_url,
                e
            )
        })?;

        let status = response.status();
        if status == StatusCode::OK {
            return response
                .json::<QueryResponse>()
                .await
                .context("Invalid response from atlasd");
        }

        match response.json::<ErrorResponse>().await {
            Ok(err) => Err(anyhow!("atlasd returned {}: {}", status, err.error)),
            Err(_) => Err(anyhow!("atlasd returned {}", status)),
        }
    }
}

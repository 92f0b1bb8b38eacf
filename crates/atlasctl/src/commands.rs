//! Command implementations for atlasctl

use crate::client::AtlasClient;
use crate::output;
use anyhow::{bail, Context, Result};
use atlas_common::{AtlasConfig, Dispatcher};
use std::path::Path;
use std::sync::Arc;

/// Queries run by `atlasctl demo`, one per agent plus a synthesized problem
pub const DEMO_QUERIES: &[&str] = &[
    "What's the weather in London?",
    "Calculate 15 + 25",
    "Temperature in Paris",
    "What is 5 * 8?",
    "Give me a random math problem",
];

/// Where queries get routed
enum Backend {
    Remote(AtlasClient),
    Local(Arc<Dispatcher>),
}

impl Backend {
    async fn connect(local: bool, server: &str) -> Result<Self> {
        if !local {
            return Ok(Self::Remote(AtlasClient::new(server)?));
        }

        // The dispatcher's blocking HTTP client must be built off the runtime
        let dispatcher = tokio::task::spawn_blocking(|| Dispatcher::from_config(&AtlasConfig::load()))
            .await
            .context("Dispatcher setup task failed")??;
        Ok(Self::Local(Arc::new(dispatcher)))
    }

    /// Route a query, returning (agent label, response text)
    async fn ask(&self, query: &str) -> Result<(String, String)> {
        match self {
            Self::Remote(client) => {
                let reply = client.query(query).await?;
                Ok((reply.agent_used, reply.response))
            }
            Self::Local(dispatcher) => {
                let dispatcher = dispatcher.clone();
                let query = query.to_string();
                let result = tokio::task::spawn_blocking(move || dispatcher.handle(&query))
                    .await
                    .context("Dispatch task failed")?;
                Ok((result.label().to_string(), result.response))
            }
        }
    }
}

pub async fn ask(query: String, local: bool, server: &str) -> Result<()> {
    let backend = Backend::connect(local, server).await?;
    let (agent, response) = backend.ask(&query).await?;
    output::display_exchange(&query, &agent, &response);
    Ok(())
}

pub async fn demo(local: bool, server: &str) -> Result<()> {
    let backend = Backend::connect(local, server).await?;

    println!("Atlas demo: {} queries", DEMO_QUERIES.len());
    println!("{}", output::separator());

    for query in DEMO_QUERIES {
        match backend.ask(query).await {
            Ok((agent, response)) => output::display_exchange(query, &agent, &response),
            Err(e) => output::display_error(&format!("{:#}", e)),
        }
        println!("{}", output::separator());
    }

    Ok(())
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite",
            path.display()
        );
    }

    AtlasConfig::save_default(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_common::{classify, Intent};

    #[test]
    fn test_demo_queries_cover_weather_and_math() {
        let intents: Vec<Intent> = DEMO_QUERIES.iter().map(|q| classify(q)).collect();
        assert!(intents.contains(&Intent::Weather));
        assert!(intents.contains(&Intent::Math));
    }

    #[tokio::test]
    async fn test_local_backend_answers_math() {
        let dispatcher = Dispatcher::new(
            Arc::new(atlas_common::FakeJsonFetcher::new()),
            Arc::new(atlas_common::ScriptedRandom::new([])),
            Default::default(),
            atlas_common::DEFAULT_LOCATION,
        );
        let backend = Backend::Local(Arc::new(dispatcher));

        let (agent, response) = backend.ask("What is 5 * 8?").await.unwrap();
        assert_eq!(agent, "Math Agent");
        assert_eq!(response, "5.0 * 8.0 = 40");
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, false).unwrap();
        assert!(AtlasConfig::load_from_path(&path).is_ok());

        assert!(init_config(&path, false).is_err());
        assert!(init_config(&path, true).is_ok());
    }
}

// HTTP agent fetcher
// GETs the endpoint and decodes a JSON array of agents

use super::AgentFetcher;
use crate::error::FetchError;
use crate::state::Agent;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches agents over HTTP with a shared client
#[derive(Debug, Clone)]
pub struct HttpAgentFetcher {
    client: reqwest::Client,
}

impl HttpAgentFetcher {
    /// Create a fetcher with its own client
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Create a fetcher reusing an existing client (connection pooling)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgentFetcher for HttpAgentFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Agent>, FetchError> {
        tracing::debug!(url = %url, "Fetching agent list");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let agents = parse_agent_list(&body)?;

        tracing::debug!(url = %url, count = agents.len(), "Agent list fetched");
        Ok(agents)
    }
}

/// Decode an endpoint body
///
/// The body must be JSON. Anything other than an array decodes to an empty
/// list, and array items that are not valid agents are skipped.
pub fn parse_agent_list(body: &str) -> Result<Vec<Agent>, FetchError> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Array(items) = value else {
        tracing::debug!("Agent endpoint did not return an array; treating as empty");
        return Ok(Vec::new());
    };

    let total = items.len();
    let agents: Vec<Agent> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if agents.len() != total {
        tracing::debug!(
            skipped = total - agents.len(),
            "Skipped malformed entries in agent list"
        );
    }

    Ok(agents)
}

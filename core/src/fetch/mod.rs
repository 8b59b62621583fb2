//! Remote agent list
//!
//! The controller never performs I/O itself. When it wants the remote list it
//! hands the host a [`FetchRequest`]; the host runs it (usually through a
//! [`FetchWorker`]) and feeds the resulting [`FetchOutcome`] back.

mod client;
mod worker;

pub use client::{parse_agent_list, HttpAgentFetcher};
pub use worker::FetchWorker;

use crate::error::FetchError;
use crate::state::Agent;
use async_trait::async_trait;

/// A fetch the controller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Endpoint to GET
    pub url: String,
    /// Endpoint generation the request belongs to
    pub generation: u64,
}

/// Result of running a [`FetchRequest`]
#[derive(Debug)]
pub struct FetchOutcome {
    /// The request that was run
    pub request: FetchRequest,
    /// Agents on success
    pub result: Result<Vec<Agent>, FetchError>,
}

/// Something that can load an agent list from a URL
#[async_trait]
pub trait AgentFetcher: Send + Sync {
    /// Load the agent list served at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<Agent>, FetchError>;
}

//! `ic-agent`-backed canister transport adapter.
//!
//! This adapter owns transport details only: agent construction, choosing
//! the query or update path, and mapping agent failures into
//! [`TransportError`]. Identity stays with the agent (anonymous unless the
//! caller supplies one).

use std::time::Duration;

use async_trait::async_trait;
use ic_agent::{Agent, AgentError};
use tracing::debug;
use url::Url;

use crate::domain::ports::{CanisterRequest, CanisterTransport, TransportError};
use crate::domain::{CallMode, NewsClientError};

/// Connection settings for [`AgentTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTransportConfig {
    /// Replica or boundary node URL.
    pub network_url: Url,
    /// Fetch the replica root key on connect. Only for local replicas.
    pub fetch_root_key: bool,
    /// Ingress expiry applied to every update call.
    pub ingress_expiry: Option<Duration>,
}

impl AgentTransportConfig {
    /// Parse a network URL into a configuration with default flags.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when the URL does not parse
    /// or does not use `http`/`https`.
    pub fn from_url(network_url: &str) -> Result<Self, NewsClientError> {
        let parsed = Url::parse(network_url).map_err(|error| {
            NewsClientError::configuration(format!("invalid network URL '{network_url}': {error}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NewsClientError::configuration(format!(
                "network URL '{network_url}' must use http or https"
            )));
        }
        Ok(Self {
            network_url: parsed,
            fetch_root_key: false,
            ingress_expiry: None,
        })
    }
}

/// Canister transport that delegates to an [`Agent`].
#[derive(Clone)]
pub struct AgentTransport {
    agent: Agent,
}

impl AgentTransport {
    /// Wrap an agent the caller already configured.
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// Build an agent from `config` and, when requested, fetch the root key.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when the agent cannot be
    /// built or the root key cannot be fetched.
    pub async fn connect(config: &AgentTransportConfig) -> Result<Self, NewsClientError> {
        let agent = Agent::builder()
            .with_url(config.network_url.as_str())
            .with_ingress_expiry(config.ingress_expiry)
            .build()
            .map_err(|error| {
                NewsClientError::configuration(format!("failed to build agent: {error}"))
            })?;

        if config.fetch_root_key {
            debug!(url = %config.network_url, "fetching replica root key");
            agent.fetch_root_key().await.map_err(|error| {
                NewsClientError::configuration(format!("failed to fetch root key: {error}"))
            })?;
        }

        Ok(Self::new(agent))
    }
}

#[async_trait]
impl CanisterTransport for AgentTransport {
    async fn invoke(&self, request: &CanisterRequest) -> Result<Vec<u8>, TransportError> {
        let canister = request.canister_id.principal();
        let outcome = match request.mode {
            CallMode::Query => {
                self.agent
                    .query(canister, request.method)
                    .with_arg(request.arg.clone())
                    .call()
                    .await
            }
            CallMode::Update => {
                self.agent
                    .update(canister, request.method)
                    .with_arg(request.arg.clone())
                    .call_and_wait()
                    .await
            }
        };
        outcome.map_err(map_agent_error)
    }
}

fn map_agent_error(error: AgentError) -> TransportError {
    match error {
        AgentError::CertifiedReject(reject) | AgentError::UncertifiedReject(reject) => {
            TransportError::rejected(reject.reject_code as u8, reject.reject_message)
        }
        AgentError::TimeoutWaitingForResponse() => TransportError::timeout(
            AgentError::TimeoutWaitingForResponse().to_string(),
        ),
        other => TransportError::transport(other.to_string()),
    }
}

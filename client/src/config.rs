//! Client configuration loaded via OrthoConfig.
//!
//! Nothing about the target deployment is compiled in: the canister id and
//! replica URL come from `NEWSHUB_*` environment variables (or the matching
//! configuration file keys) and can be overridden by callers.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::NewsClientError;
use crate::outbound::agent::AgentTransportConfig;

/// Replica URL used when none is configured (local `dfx` replica).
pub const DEFAULT_NETWORK_URL: &str = "http://127.0.0.1:4943";

/// Configuration values for connecting to the news canister.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NEWSHUB")]
pub struct ClientSettings {
    /// Textual principal of the news canister.
    pub canister_id: Option<String>,
    /// Replica or boundary node URL.
    pub network_url: Option<String>,
    /// Fetch the replica root key on connect (local replicas only).
    #[ortho_config(default = false)]
    pub fetch_root_key: bool,
    /// Optional ingress expiry for update calls, in seconds.
    pub ingress_expiry_secs: Option<u64>,
}

impl ClientSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when a value is malformed.
    pub fn from_environment() -> Result<Self, NewsClientError> {
        Self::load_from_iter([OsString::from("newshub")])
            .map_err(|error| NewsClientError::configuration(error.to_string()))
    }

    /// Return the configured replica URL, falling back to the local default.
    pub fn network_url(&self) -> &str {
        self.network_url.as_deref().unwrap_or(DEFAULT_NETWORK_URL)
    }

    /// Return the configured canister id.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when no id is configured.
    pub fn canister_id(&self) -> Result<&str, NewsClientError> {
        self.canister_id
            .as_deref()
            .ok_or_else(|| NewsClientError::configuration("NEWSHUB_CANISTER_ID is not set"))
    }

    /// Build the agent transport configuration described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when the URL is unusable.
    pub fn transport_config(&self) -> Result<AgentTransportConfig, NewsClientError> {
        let mut config = AgentTransportConfig::from_url(self.network_url())?;
        config.fetch_root_key = self.fetch_root_key;
        config.ingress_expiry = self.ingress_expiry_secs.map(Duration::from_secs);
        Ok(config)
    }
}

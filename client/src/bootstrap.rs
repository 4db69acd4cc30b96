//! Wiring from settings to a ready client.

use std::sync::Arc;

use tracing::info;

use crate::config::ClientSettings;
use crate::domain::{CanisterId, NewsAppClient, NewsClientError};
use crate::outbound::agent::AgentTransport;

impl NewsAppClient {
    /// Connect an agent transport described by `settings` and bind it to the
    /// configured canister.
    ///
    /// The canister id is parsed before any agent is built so a bad address
    /// never triggers network activity.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when the canister id is
    /// missing or the transport cannot be built, and
    /// [`NewsClientError::AddressResolution`] when the canister id does not
    /// parse.
    pub async fn connect(settings: &ClientSettings) -> Result<Self, NewsClientError> {
        let canister_id = CanisterId::parse(settings.canister_id()?)?;
        let transport = AgentTransport::connect(&settings.transport_config()?).await?;
        info!(
            canister = %canister_id,
            url = settings.network_url(),
            "news canister client ready"
        );
        Ok(Self::new(Arc::new(transport), canister_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(canister_id: Option<&str>, network_url: &str) -> ClientSettings {
        ClientSettings {
            canister_id: canister_id.map(str::to_owned),
            network_url: Some(network_url.to_owned()),
            fetch_root_key: false,
            ingress_expiry_secs: None,
        }
    }

    #[tokio::test]
    async fn connect_requires_a_canister_id() {
        let error = NewsAppClient::connect(&settings(None, "http://127.0.0.1:4943"))
            .await
            .expect_err("missing id must fail");
        assert!(matches!(error, NewsClientError::Configuration { .. }));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_canister_ids() {
        let error = NewsAppClient::connect(&settings(Some("nope"), "http://127.0.0.1:4943"))
            .await
            .expect_err("malformed id must fail");
        assert!(matches!(error, NewsClientError::AddressResolution { .. }));
    }

    #[tokio::test]
    async fn connect_rejects_unusable_network_urls() {
        let error = NewsAppClient::connect(&settings(
            Some("bkyz2-fmaaa-aaaaa-qaaaq-cai"),
            "ftp://127.0.0.1",
        ))
        .await
        .expect_err("unusable URL must fail");
        assert!(matches!(error, NewsClientError::Configuration { .. }));
    }

    #[tokio::test]
    async fn connect_binds_the_configured_canister() {
        let client = NewsAppClient::connect(&settings(
            Some("bkyz2-fmaaa-aaaaa-qaaaq-cai"),
            "http://127.0.0.1:4943",
        ))
        .await
        .expect("client connects without network access");
        assert_eq!(client.canister_id().to_string(), "bkyz2-fmaaa-aaaaa-qaaaq-cai");
    }
}

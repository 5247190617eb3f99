/// REST client for the Portal wallet-as-a-service API
///
/// This module covers the three endpoints the wallet consumes: minting a
/// client-scoped API key, fetching per-chain asset balances, and building
/// an unsigned transfer transaction. Signing never happens here.
use crate::api::types::{Assets, BuildTransactionRequest, BuildTransactionResponse, ClientKeyResponse};
use crate::errors::{WalletError, WalletResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// The Portal REST surface, abstracted so the orchestrator can be driven
/// by an in-process fake in tests.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Exchange the provider API key for a client-scoped API key.
    async fn create_client_key(&self, provider_api_key: &str) -> WalletResult<String>;

    /// Fetch native and token balances for the active chain.
    async fn fetch_assets(&self, client_api_key: &str, chain: &str) -> WalletResult<Assets>;

    /// Build an unsigned transfer transaction; returns the opaque base64
    /// blob to hand to the signer.
    async fn build_transfer(
        &self,
        client_api_key: &str,
        chain: &str,
        request: &BuildTransactionRequest,
    ) -> WalletResult<String>;
}

/// HTTP implementation of [`PortalApi`].
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    /// Create a new Portal REST client with a per-request timeout.
    pub fn new(base_url: impl Into<String>) -> WalletResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                WalletError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(PortalClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        bearer_token: &str,
    ) -> WalletResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer_token)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        bearer_token: &str,
        payload: Option<&(impl serde::Serialize + Sync)>,
    ) -> WalletResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.post(&url).bearer_auth(bearer_token);
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }
        let response = builder.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: for<'de> serde::Deserialize<'de>>(
        response: reqwest::Response,
    ) -> WalletResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WalletError::NetworkError(format!(
                "HTTP error {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| WalletError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn create_client_key(&self, provider_api_key: &str) -> WalletResult<String> {
        let response: ClientKeyResponse = self
            .post_json(
                "/api/v3/custodians/me/clients",
                provider_api_key,
                None::<&serde_json::Value>,
            )
            .await?;
        Ok(response.client_api_key)
    }

    async fn fetch_assets(&self, client_api_key: &str, chain: &str) -> WalletResult<Assets> {
        let path = format!("/api/v3/clients/me/chains/{}/assets", chain);
        self.get_json(&path, client_api_key).await
    }

    async fn build_transfer(
        &self,
        client_api_key: &str,
        chain: &str,
        request: &BuildTransactionRequest,
    ) -> WalletResult<String> {
        let path = format!(
            "/api/v3/clients/me/chains/{}/assets/send/build-transaction",
            chain
        );
        let response: BuildTransactionResponse =
            self.post_json(&path, client_api_key, Some(request)).await?;
        Ok(response.transaction)
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn provider_key() -> String {
        std::env::var("PORTAL_API_KEY").unwrap_or_default()
    }

    #[tokio::test]
    #[ignore = "requires a live Portal API key in PORTAL_API_KEY"]
    async fn test_real_client_key_exchange() {
        let client = PortalClient::new("https://api.portalhq.io").unwrap();
        let result = client.create_client_key(&provider_key()).await;
        assert!(result.is_ok(), "Client key exchange should succeed");
    }

    #[tokio::test]
    #[ignore = "requires a live client API key in PORTAL_CLIENT_API_KEY"]
    async fn test_real_assets_call() {
        let client = PortalClient::new("https://api.portalhq.io").unwrap();
        let client_key = std::env::var("PORTAL_CLIENT_API_KEY").unwrap_or_default();
        let result = client.fetch_assets(&client_key, "solana-devnet").await;
        assert!(result.is_ok(), "Assets call should succeed");
    }
}

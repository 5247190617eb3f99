use std::collections::HashMap;

/// CAIP-2 chain identifier for Solana mainnet-beta.
pub const SOLANA_MAINNET_CHAIN_ID: &str = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp";
/// CAIP-2 chain identifier for Solana devnet.
pub const SOLANA_DEVNET_CHAIN_ID: &str = "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1";

pub const SOLANA_MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const SOLANA_DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// RPC method used to sign and submit a pre-built Solana transaction.
pub const SOLANA_SIGN_AND_SEND_METHOD: &str = "sol_signAndSendTransaction";

const DEFAULT_API_HOST: &str = "https://api.portalhq.io";
const DEFAULT_TOKEN_SYMBOL: &str = "PYUSD";

/// A chain profile selects the signing context and the path segment used by
/// the Portal asset endpoints (e.g. `solana-devnet`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainProfile {
    pub chain_id: &'static str,
    pub asset_path: &'static str,
    pub rpc_url: &'static str,
}

impl ChainProfile {
    pub fn devnet() -> Self {
        Self {
            chain_id: SOLANA_DEVNET_CHAIN_ID,
            asset_path: "solana-devnet",
            rpc_url: SOLANA_DEVNET_RPC_URL,
        }
    }

    pub fn mainnet() -> Self {
        Self {
            chain_id: SOLANA_MAINNET_CHAIN_ID,
            asset_path: "solana",
            rpc_url: SOLANA_MAINNET_RPC_URL,
        }
    }
}

/// Static wallet configuration.
///
/// There is no config file: the provider API key and the optional
/// pre-issued client key are compiled in or injected through the
/// environment, and the RPC map is fixed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Portal REST API.
    pub api_host: String,
    /// Credential identifying this application to the provider. Used only
    /// to mint a client-scoped key during bootstrap.
    pub provider_api_key: String,
    /// Optional pre-issued client API key; when set, bootstrap skips the
    /// key exchange entirely.
    pub client_api_key: Option<String>,
    /// Active chain for balances and transfers.
    pub chain: ChainProfile,
    /// Token transferred by the send flow.
    pub token_symbol: String,
    /// Auto-approve signing requests inside the provider SDK.
    pub auto_approve: bool,
}

impl Config {
    pub fn new(provider_api_key: impl Into<String>) -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            provider_api_key: provider_api_key.into(),
            client_api_key: None,
            chain: ChainProfile::devnet(),
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            auto_approve: true,
        }
    }

    /// Build a configuration from the environment: `PORTAL_API_KEY` is
    /// required, `PORTAL_CLIENT_API_KEY` and `PORTAL_API_HOST` optional.
    pub fn from_env() -> Option<Self> {
        let provider_api_key = std::env::var("PORTAL_API_KEY").ok()?;
        let mut config = Self::new(provider_api_key);
        if let Ok(client_key) = std::env::var("PORTAL_CLIENT_API_KEY") {
            if !client_key.is_empty() {
                config.client_api_key = Some(client_key);
            }
        }
        if let Ok(host) = std::env::var("PORTAL_API_HOST") {
            if !host.is_empty() {
                config.api_host = host;
            }
        }
        Some(config)
    }

    /// Chain-id to RPC endpoint map handed to the provider SDK. Both
    /// networks are always present; only `self.chain` is actively used.
    pub fn rpc_config(&self) -> HashMap<String, String> {
        HashMap::from([
            (
                SOLANA_MAINNET_CHAIN_ID.to_string(),
                SOLANA_MAINNET_RPC_URL.to_string(),
            ),
            (
                SOLANA_DEVNET_CHAIN_ID.to_string(),
                SOLANA_DEVNET_RPC_URL.to_string(),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devnet_defaults() {
        let config = Config::new("provider-key");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.chain, ChainProfile::devnet());
        assert_eq!(config.token_symbol, "PYUSD");
        assert!(config.auto_approve);
        assert!(config.client_api_key.is_none());
    }

    #[test]
    fn rpc_config_carries_both_networks() {
        let config = Config::new("provider-key");
        let rpc = config.rpc_config();
        assert_eq!(
            rpc.get(SOLANA_MAINNET_CHAIN_ID).map(String::as_str),
            Some(SOLANA_MAINNET_RPC_URL)
        );
        assert_eq!(
            rpc.get(SOLANA_DEVNET_CHAIN_ID).map(String::as_str),
            Some(SOLANA_DEVNET_RPC_URL)
        );
    }
}

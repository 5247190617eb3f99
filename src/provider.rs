/// Capability surface of the external wallet provider SDK
///
/// Key custody, MPC signing and wallet backup live entirely inside the
/// provider; this crate only calls through the trait below. A mock
/// implementation drives the orchestrator in tests without any network.
use crate::errors::{WalletError, WalletResult};
use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A mechanism for restoring wallet access without the original device's
/// key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecoveryMethod {
    Password,
    GoogleDrive,
    ICloud,
    Passkey,
}

/// Per-chain addresses returned by wallet creation or recovery. A missing
/// entry means no wallet exists yet on that chain; it is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainAddresses {
    pub solana: Option<String>,
    pub ethereum: Option<String>,
}

/// Operations consumed from the provider SDK.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Create a new wallet; returns the addresses per chain.
    async fn create_wallet(&self) -> WalletResult<ChainAddresses>;

    /// Recovery methods with an existing backup for this client.
    async fn available_recovery_methods(&self) -> WalletResult<Vec<RecoveryMethod>>;

    /// Set the password used by subsequent password-based backup/recovery.
    async fn set_password(&self, password: &SecretString) -> WalletResult<()>;

    /// Back up the wallet with the given method.
    async fn backup_wallet(&self, method: RecoveryMethod) -> WalletResult<()>;

    /// Recover the wallet with the given method.
    async fn recover_wallet(&self, method: RecoveryMethod) -> WalletResult<ChainAddresses>;

    /// Issue a signed RPC request (e.g. sign-and-send a base64 transaction)
    /// scoped to a chain identifier. The result shape is method-specific.
    async fn request(
        &self,
        chain_id: &str,
        method: &str,
        params: Vec<String>,
    ) -> WalletResult<serde_json::Value>;
}

/// Constructs a provider instance for a client-scoped API key. Mirrors the
/// SDK constructor: client key, chain-id to RPC endpoint map, auto-approve.
pub trait ProviderFactory: Send + Sync {
    fn connect(
        &self,
        client_api_key: &str,
        rpc_config: HashMap<String, String>,
        auto_approve: bool,
    ) -> WalletResult<Arc<dyn WalletProvider>>;
}

/// Extract a transaction hash from a sign-and-send result. The SDK returns
/// either a bare string or an object carrying a `result` string.
pub fn transaction_hash(result: &serde_json::Value) -> WalletResult<String> {
    let hash = result
        .as_str()
        .or_else(|| result.get("result").and_then(|v| v.as_str()));
    match hash {
        Some(hash) if !hash.is_empty() => Ok(hash.to_string()),
        _ => Err(WalletError::InvalidResponse(
            "Sign-and-send result carried no transaction hash".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_from_bare_string() {
        let value = serde_json::json!("H123");
        assert_eq!(transaction_hash(&value).unwrap(), "H123");
    }

    #[test]
    fn hash_from_result_object() {
        let value = serde_json::json!({"result": "H123"});
        assert_eq!(transaction_hash(&value).unwrap(), "H123");
    }

    #[test]
    fn missing_hash_is_invalid_response() {
        let value = serde_json::json!({"result": 7});
        assert!(matches!(
            transaction_hash(&value),
            Err(WalletError::InvalidResponse(_))
        ));
    }

    #[test]
    fn recovery_method_wire_format() {
        let json = serde_json::to_string(&RecoveryMethod::Password).unwrap();
        assert_eq!(json, "\"PASSWORD\"");
    }
}

/// Domain entities owned by the wallet orchestrator
use crate::api::types::{Assets, TokenBalance};
use crate::provider::RecoveryMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-scoped session established once during bootstrap. Immutable for
/// the process lifetime.
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub client_api_key: String,
    pub recovery_methods: Vec<RecoveryMethod>,
}

impl ClientSession {
    pub fn recovery_available(&self) -> bool {
        self.recovery_methods.contains(&RecoveryMethod::Password)
    }
}

/// Handle to a generated or recovered wallet. Set once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletHandle {
    pub solana_address: String,
}

/// Point-in-time balances for the active chain. Replaced wholesale on
/// every refresh; never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub native_balance: String,
    pub native_decimals: u8,
    pub tokens: Vec<TokenBalance>,
    pub fetched_at: DateTime<Utc>,
}

impl BalanceSnapshot {
    pub fn from_assets(assets: Assets) -> Self {
        Self {
            native_balance: assets.native_balance.balance,
            native_decimals: assets.native_balance.decimals,
            tokens: assets.token_balances,
            fetched_at: Utc::now(),
        }
    }

    /// Exact-match, case-sensitive token lookup; first match wins.
    pub fn token_balance(&self, symbol: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| token.symbol == symbol)
            .map(|token| token.balance.as_str())
    }
}

/// A transfer in flight through the build/sign/submit pipeline. Discarded
/// once submission succeeds or fails.
#[derive(Debug, Clone)]
pub struct PendingTransfer {
    pub recipient: String,
    pub token: String,
    pub amount: String,
}

/// Receipt of the most recent successful submission; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{NativeBalance, TokenBalanceMetadata};

    fn assets() -> Assets {
        Assets {
            native_balance: NativeBalance {
                balance: "5".to_string(),
                decimals: 9,
                name: "Solana".to_string(),
                raw_balance: "5000000000".to_string(),
                symbol: "SOL".to_string(),
            },
            token_balances: vec![TokenBalance {
                balance: "100".to_string(),
                decimals: 6,
                name: "PayPal USD".to_string(),
                raw_balance: "100000000".to_string(),
                symbol: "PYUSD".to_string(),
                metadata: TokenBalanceMetadata {
                    token_account_address: "TokAcc1".to_string(),
                    token_mint_address: "Mint1".to_string(),
                },
            }],
        }
    }

    #[test]
    fn snapshot_from_assets() {
        let snapshot = BalanceSnapshot::from_assets(assets());
        assert_eq!(snapshot.native_balance, "5");
        assert_eq!(snapshot.native_decimals, 9);
        assert_eq!(snapshot.token_balance("PYUSD"), Some("100"));
        assert_eq!(snapshot.token_balance("pyusd"), None);
    }

    #[test]
    fn recovery_availability_requires_password_method() {
        let session = ClientSession {
            client_api_key: "C1".to_string(),
            recovery_methods: vec![RecoveryMethod::Passkey],
        };
        assert!(!session.recovery_available());

        let session = ClientSession {
            client_api_key: "C1".to_string(),
            recovery_methods: vec![RecoveryMethod::Passkey, RecoveryMethod::Password],
        };
        assert!(session.recovery_available());
    }
}

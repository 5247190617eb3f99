use serde::{Deserialize, Serialize};

/// Response of `POST /api/v3/custodians/me/clients`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientKeyResponse {
    pub client_api_key: String,
}

/// Response of the per-chain assets endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    pub native_balance: NativeBalance,
    pub token_balances: Vec<TokenBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeBalance {
    pub balance: String,
    pub decimals: u8,
    pub name: String,
    pub raw_balance: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub balance: String,
    pub decimals: u8,
    pub name: String,
    pub raw_balance: String,
    pub symbol: String,
    pub metadata: TokenBalanceMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceMetadata {
    pub token_account_address: String,
    pub token_mint_address: String,
}

impl Assets {
    /// Balance of the token with the given symbol. Exact, case-sensitive
    /// match; first match wins; an unmatched symbol is `None`, not an error.
    pub fn token_balance(&self, symbol: &str) -> Option<&str> {
        self.token_balances
            .iter()
            .find(|token| token.symbol == symbol)
            .map(|token| token.balance.as_str())
    }
}

/// Payload of the build-transaction endpoint. All fields are strings on
/// the wire, including the decimal amount.
#[derive(Debug, Clone, Serialize)]
pub struct BuildTransactionRequest {
    pub to: String,
    pub token: String,
    pub amount: String,
}

/// Response of the build-transaction endpoint. Only the base64 transaction
/// blob is consumed; it is passed to the signer unmodified.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildTransactionResponse {
    pub transaction: String,
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalletError {
    // Session bootstrap
    Bootstrap(String),
    AlreadyBootstrapped,
    NotInitialized,

    // Wallet lifecycle
    Generation(String),
    Recovery(String),
    Backup(String),

    // Balances
    BalanceFetch(String),

    // Transfer pipeline
    BuildFailed(String),
    SubmitFailed(String),

    // Network errors
    NetworkError(String),
    ConnectionTimeout,
    InvalidResponse(String),

    // Validation errors
    ValidationError(String),
    InvalidAddress(String),
    InvalidAmount(String),

    // Generic errors
    Unknown(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalletError::Bootstrap(msg) => write!(f, "Bootstrap error: {}", msg),
            WalletError::AlreadyBootstrapped => write!(f, "Session already bootstrapped"),
            WalletError::NotInitialized => write!(f, "Provider not initialized"),

            WalletError::Generation(msg) => write!(f, "Wallet generation error: {}", msg),
            WalletError::Recovery(msg) => write!(f, "Wallet recovery error: {}", msg),
            WalletError::Backup(msg) => write!(f, "Wallet backup error: {}", msg),

            WalletError::BalanceFetch(msg) => write!(f, "Balance fetch error: {}", msg),

            WalletError::BuildFailed(msg) => write!(f, "Transaction build failed: {}", msg),
            WalletError::SubmitFailed(msg) => write!(f, "Transaction submit failed: {}", msg),

            WalletError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            WalletError::ConnectionTimeout => write!(f, "Connection timeout"),
            WalletError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),

            WalletError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            WalletError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),

            WalletError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}

pub type WalletResult<T> = Result<T, WalletError>;

// Conversion helpers
impl From<reqwest::Error> for WalletError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            WalletError::ConnectionTimeout
        } else if error.is_decode() {
            WalletError::InvalidResponse(error.to_string())
        } else {
            WalletError::NetworkError(error.to_string())
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(error: serde_json::Error) -> Self {
        WalletError::InvalidResponse(format!("JSON error: {}", error))
    }
}

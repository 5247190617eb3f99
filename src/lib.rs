// lib.rs - Core library structure for the Portal PYUSD wallet

pub mod api;
pub mod config;
pub mod errors;
pub mod model;
pub mod orchestrator;
pub mod portal_client;
pub mod provider;
pub mod state;
pub mod validation;

// Re-export common types
pub use api::types::{
    Assets, BuildTransactionRequest, BuildTransactionResponse, ClientKeyResponse, NativeBalance,
    TokenBalance, TokenBalanceMetadata,
};
pub use config::{ChainProfile, Config};
pub use errors::{WalletError, WalletResult};
pub use model::{
    BalanceSnapshot, ClientSession, PendingTransfer, TransactionReceipt, WalletHandle,
};
pub use orchestrator::WalletOrchestrator;
pub use portal_client::{PortalApi, PortalClient};
pub use provider::{ChainAddresses, ProviderFactory, RecoveryMethod, WalletProvider};
pub use state::{OpToken, StateCell, UiState};
pub use validation::InputValidator;

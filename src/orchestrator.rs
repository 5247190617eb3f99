/// Wallet state machine and API orchestration
///
/// Sequences the Portal REST API and the provider SDK through the session
/// lifecycle: bootstrap, generate/recover, balance refresh, transfer,
/// backup. All published UI state flows through one serialized path; the
/// presentation layer observes it through a watch receiver and never
/// touches orchestrator-owned data.
use crate::api::types::BuildTransactionRequest;
use crate::config::{Config, SOLANA_SIGN_AND_SEND_METHOD};
use crate::errors::{WalletError, WalletResult};
use crate::model::{
    BalanceSnapshot, ClientSession, PendingTransfer, TransactionReceipt, WalletHandle,
};
use crate::portal_client::PortalApi;
use crate::provider::{transaction_hash, ChainAddresses, ProviderFactory, RecoveryMethod, WalletProvider};
use crate::state::{OpToken, StateCell, UiState};
use crate::validation::InputValidator;
use parking_lot::RwLock;
use secrecy::SecretString;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Default)]
struct Inner {
    bootstrapped: bool,
    session: Option<ClientSession>,
    provider: Option<Arc<dyn WalletProvider>>,
    wallet: Option<WalletHandle>,
    balances: Option<BalanceSnapshot>,
    last_receipt: Option<TransactionReceipt>,
}

pub struct WalletOrchestrator {
    config: Config,
    api: Arc<dyn PortalApi>,
    factory: Arc<dyn ProviderFactory>,
    validator: InputValidator,
    state: StateCell,
    // Never held across an await point.
    inner: RwLock<Inner>,
}

impl WalletOrchestrator {
    pub fn new(
        config: Config,
        api: Arc<dyn PortalApi>,
        factory: Arc<dyn ProviderFactory>,
    ) -> WalletResult<Self> {
        Ok(Self {
            config,
            api,
            factory,
            validator: InputValidator::new()?,
            state: StateCell::new(UiState::Loading),
            inner: RwLock::new(Inner::default()),
        })
    }

    /// Observe published UI state.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn current_state(&self) -> UiState {
        self.state.current()
    }

    pub fn wallet_handle(&self) -> Option<WalletHandle> {
        self.inner.read().wallet.clone()
    }

    pub fn balance_snapshot(&self) -> Option<BalanceSnapshot> {
        self.inner.read().balances.clone()
    }

    pub fn last_receipt(&self) -> Option<TransactionReceipt> {
        self.inner.read().last_receipt.clone()
    }

    /// Establish the client session and construct the provider. Runs once
    /// per orchestrator; a second call is a programming error and returns
    /// `AlreadyBootstrapped` without touching published state. Bootstrap
    /// failure is terminal: `Failed` is published and nothing is retried.
    pub async fn bootstrap(&self) -> WalletResult<()> {
        {
            let mut inner = self.inner.write();
            if inner.bootstrapped {
                return Err(WalletError::AlreadyBootstrapped);
            }
            inner.bootstrapped = true;
        }

        let token = self.state.begin();
        self.state.publish(token, UiState::Loading);

        match self.run_bootstrap().await {
            Ok(session) => {
                let recovery_available = session.recovery_available();
                log::info!(
                    "Portal session initialized (recovery available: {})",
                    recovery_available
                );
                self.state.publish(token, UiState::Ready { recovery_available });
                Ok(())
            }
            Err(e) => {
                let message = format!("Error initializing session: {}", e);
                log::error!("{}", message);
                self.state.publish(token, UiState::Failed { message: message.clone() });
                Err(WalletError::Bootstrap(message))
            }
        }
    }

    async fn run_bootstrap(&self) -> WalletResult<ClientSession> {
        let client_api_key = match &self.config.client_api_key {
            Some(key) => key.clone(),
            None => {
                self.api
                    .create_client_key(&self.config.provider_api_key)
                    .await?
            }
        };

        let provider = self.factory.connect(
            &client_api_key,
            self.config.rpc_config(),
            self.config.auto_approve,
        )?;
        let recovery_methods = provider.available_recovery_methods().await?;

        let session = ClientSession {
            client_api_key,
            recovery_methods,
        };

        let mut inner = self.inner.write();
        inner.session = Some(session.clone());
        inner.provider = Some(provider);
        Ok(session)
    }

    /// Create a wallet for the session. Callable only from `Ready`; a
    /// failure is non-fatal and returns the UI to `Ready`. The provider may
    /// legitimately return no Solana address ("not yet generated"), which
    /// yields `Ok(None)`.
    pub async fn generate_wallet(&self) -> WalletResult<Option<WalletHandle>> {
        let (provider, recovery_available) = self.ready_provider()?;

        let token = self.state.begin();
        self.state.publish(token, UiState::Loading);

        match provider.create_wallet().await {
            Ok(addresses) => {
                let handle = self.adopt_wallet(token, addresses, recovery_available).await;
                if let Some(handle) = &handle {
                    log::info!("Wallet created, Solana address: {}", handle.solana_address);
                }
                Ok(handle)
            }
            Err(e) => {
                log::error!("Error generating wallet: {}", e);
                self.state.publish(token, UiState::Ready { recovery_available });
                Err(WalletError::Generation(e.to_string()))
            }
        }
    }

    /// Recover the wallet from a password backup. Callable only from
    /// `Ready` with recovery available; success proceeds exactly like
    /// generation.
    pub async fn recover_wallet(
        &self,
        password: SecretString,
    ) -> WalletResult<Option<WalletHandle>> {
        self.validator.validate_password(&password)?;
        let (provider, recovery_available) = self.ready_provider().map_err(|e| match e {
            WalletError::Generation(msg) => WalletError::Recovery(msg),
            other => other,
        })?;
        if !recovery_available {
            return Err(WalletError::Recovery(
                "No recovery method is available for this client".to_string(),
            ));
        }

        let token = self.state.begin();
        self.state.publish(token, UiState::Loading);

        let recovered = async {
            provider.set_password(&password).await?;
            provider.recover_wallet(RecoveryMethod::Password).await
        }
        .await;

        match recovered {
            Ok(addresses) => {
                let handle = self.adopt_wallet(token, addresses, recovery_available).await;
                if let Some(handle) = &handle {
                    log::info!("Wallet recovered, Solana address: {}", handle.solana_address);
                }
                Ok(handle)
            }
            Err(e) => {
                log::error!("Error recovering wallet: {}", e);
                self.state.publish(token, UiState::Ready { recovery_available });
                Err(WalletError::Recovery(e.to_string()))
            }
        }
    }

    /// Refresh the balance snapshot. Failure preserves the previous
    /// snapshot, republishes current wallet state and is otherwise silent.
    pub async fn refresh_balances(&self) -> WalletResult<BalanceSnapshot> {
        let token = self.state.begin();
        let result = self.fetch_and_store().await;
        self.publish_wallet_state(token);
        result
    }

    /// Transfer `amount` of the configured token to `recipient`. Invalid
    /// input aborts before any network call. Build or submit failure
    /// returns the UI to the last `WalletActive`, never a stuck loader.
    pub async fn transfer(
        &self,
        recipient: &str,
        amount: &str,
    ) -> WalletResult<TransactionReceipt> {
        self.validator.validate_recipient(recipient)?;
        let amount = self.validator.validate_amount(amount)?;

        let (client_api_key, provider) = {
            let inner = self.inner.read();
            let session = inner.session.as_ref().ok_or(WalletError::NotInitialized)?;
            if inner.wallet.is_none() {
                return Err(WalletError::ValidationError(
                    "No active wallet to transfer from".to_string(),
                ));
            }
            let provider = inner.provider.clone().ok_or(WalletError::NotInitialized)?;
            (session.client_api_key.clone(), provider)
        };

        let pending = PendingTransfer {
            recipient: recipient.to_string(),
            token: self.config.token_symbol.clone(),
            amount,
        };

        let token = self.state.begin();
        self.state.publish(token, UiState::Loading);

        // Phase 1: build the unsigned transaction.
        let request = BuildTransactionRequest {
            to: pending.recipient.clone(),
            token: pending.token.clone(),
            amount: pending.amount.clone(),
        };
        let transaction = match self
            .api
            .build_transfer(&client_api_key, self.config.chain.asset_path, &request)
            .await
        {
            Ok(transaction) => transaction,
            Err(e) => {
                log::error!("Unable to build transaction: {}", e);
                self.publish_wallet_state(token);
                return Err(WalletError::BuildFailed(e.to_string()));
            }
        };

        // Phase 2: sign and submit through the provider. The base64 blob is
        // passed through untouched.
        let submitted = provider
            .request(
                self.config.chain.chain_id,
                SOLANA_SIGN_AND_SEND_METHOD,
                vec![transaction],
            )
            .await
            .and_then(|result| transaction_hash(&result));

        match submitted {
            Ok(hash) => {
                log::info!("Transaction submitted, hash: {}", hash);
                let receipt = TransactionReceipt { hash };
                self.inner.write().last_receipt = Some(receipt.clone());
                self.publish_wallet_state(token);
                Ok(receipt)
            }
            Err(e) => {
                log::error!("Unable to sign and send transaction: {}", e);
                self.publish_wallet_state(token);
                Err(WalletError::SubmitFailed(e.to_string()))
            }
        }
    }

    /// Back up the wallet with a password. Failure reverts the UI to the
    /// current `WalletActive`.
    pub async fn backup_wallet(&self, password: SecretString) -> WalletResult<()> {
        self.validator.validate_password(&password)?;

        let provider = {
            let inner = self.inner.read();
            if inner.wallet.is_none() {
                return Err(WalletError::Backup(
                    "No active wallet to back up".to_string(),
                ));
            }
            inner.provider.clone().ok_or(WalletError::NotInitialized)?
        };

        let token = self.state.begin();
        self.state.publish(token, UiState::Loading);

        let result = async {
            provider.set_password(&password).await?;
            provider.backup_wallet(RecoveryMethod::Password).await
        }
        .await;

        self.publish_wallet_state(token);
        match result {
            Ok(()) => {
                log::info!("Wallet backup completed");
                Ok(())
            }
            Err(e) => {
                log::error!("Error backing up wallet: {}", e);
                Err(WalletError::Backup(e.to_string()))
            }
        }
    }

    fn ready_provider(&self) -> WalletResult<(Arc<dyn WalletProvider>, bool)> {
        let inner = self.inner.read();
        let session = inner.session.as_ref().ok_or(WalletError::NotInitialized)?;
        if inner.wallet.is_some() {
            return Err(WalletError::Generation(
                "A wallet already exists for this session".to_string(),
            ));
        }
        let provider = inner.provider.clone().ok_or(WalletError::NotInitialized)?;
        Ok((provider, session.recovery_available()))
    }

    /// Store the wallet handle from a create/recover result and attempt
    /// exactly one balance refresh. No Solana address means "not yet
    /// generated": the UI returns to `Ready` and no handle is stored.
    async fn adopt_wallet(
        &self,
        token: OpToken,
        addresses: ChainAddresses,
        recovery_available: bool,
    ) -> Option<WalletHandle> {
        let address = addresses.solana.filter(|address| !address.is_empty());
        let Some(address) = address else {
            log::warn!("Provider returned no Solana address");
            self.state.publish(token, UiState::Ready { recovery_available });
            return None;
        };

        let handle = WalletHandle {
            solana_address: address,
        };
        self.inner.write().wallet = Some(handle.clone());

        // Refresh failures are swallowed; the wallet state is published
        // with whatever snapshot exists.
        let _ = self.fetch_and_store().await;
        self.publish_wallet_state(token);
        Some(handle)
    }

    async fn fetch_and_store(&self) -> WalletResult<BalanceSnapshot> {
        let client_api_key = {
            let inner = self.inner.read();
            let session = inner.session.as_ref().ok_or(WalletError::NotInitialized)?;
            if inner.wallet.is_none() {
                return Err(WalletError::BalanceFetch(
                    "No active wallet to refresh".to_string(),
                ));
            }
            session.client_api_key.clone()
        };

        match self
            .api
            .fetch_assets(&client_api_key, self.config.chain.asset_path)
            .await
        {
            Ok(assets) => {
                let snapshot = BalanceSnapshot::from_assets(assets);
                self.inner.write().balances = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => {
                log::warn!("Unable to fetch assets, keeping previous snapshot: {}", e);
                Err(WalletError::BalanceFetch(e.to_string()))
            }
        }
    }

    /// Publish `WalletActive` from the currently stored wallet fields.
    /// Balances default to "0" until the first snapshot lands; the last
    /// receipt survives refreshes. A no-op when no wallet exists.
    fn publish_wallet_state(&self, token: OpToken) {
        let state = {
            let inner = self.inner.read();
            let Some(wallet) = &inner.wallet else {
                return;
            };
            let native_balance = inner
                .balances
                .as_ref()
                .map(|snapshot| snapshot.native_balance.clone())
                .unwrap_or_else(|| "0".to_string());
            let token_balance = inner
                .balances
                .as_ref()
                .and_then(|snapshot| snapshot.token_balance(&self.config.token_symbol))
                .unwrap_or("0")
                .to_string();
            UiState::WalletActive {
                address: wallet.solana_address.clone(),
                native_balance,
                token_balance,
                last_receipt: inner.last_receipt.as_ref().map(|r| r.hash.clone()),
            }
        };
        self.state.publish(token, state);
    }
}

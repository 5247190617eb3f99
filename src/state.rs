/// Published UI state and its single serialized write path
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// The one projection the presentation layer observes. Closed sum type;
/// consumers must match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UiState {
    /// An operation is in flight and no wallet screen is showable yet.
    Loading,
    /// Session bootstrapped, no wallet on this device.
    Ready { recovery_available: bool },
    /// Wallet exists; balances default to "0" until the first snapshot.
    WalletActive {
        address: String,
        native_balance: String,
        token_balance: String,
        last_receipt: Option<String>,
    },
    /// Bootstrap failed; terminal for the session.
    Failed { message: String },
}

/// Token identifying one logical operation. Publications carrying a token
/// older than the most recently started operation are dropped, so a slow
/// completion can never overwrite newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpToken(u64);

/// Single-writer cell for [`UiState`]. All mutations funnel through
/// [`StateCell::publish`], which is safe to call from any completion
/// context; observers hold a watch receiver.
#[derive(Debug)]
pub struct StateCell {
    tx: watch::Sender<UiState>,
    epoch: AtomicU64,
    write_lock: Mutex<()>,
}

impl StateCell {
    pub fn new(initial: UiState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            tx,
            epoch: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Start a new logical operation, invalidating tokens handed out
    /// earlier.
    pub fn begin(&self) -> OpToken {
        OpToken(self.epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publish a state on behalf of an operation. Returns false when the
    /// token is stale and the publication was dropped.
    pub fn publish(&self, token: OpToken, state: UiState) -> bool {
        let _guard = self.write_lock.lock();
        if token.0 != self.epoch.load(Ordering::SeqCst) {
            log::debug!("Dropping stale state publication: {:?}", state);
            return false;
        }
        self.tx.send_replace(state);
        true
    }

    pub fn current(&self) -> UiState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_with_current_token() {
        let cell = StateCell::new(UiState::Loading);
        let token = cell.begin();
        assert!(cell.publish(
            token,
            UiState::Ready {
                recovery_available: true
            }
        ));
        assert_eq!(
            cell.current(),
            UiState::Ready {
                recovery_available: true
            }
        );
    }

    #[test]
    fn stale_token_is_dropped() {
        let cell = StateCell::new(UiState::Loading);
        let stale = cell.begin();
        let fresh = cell.begin();

        assert!(cell.publish(
            fresh,
            UiState::WalletActive {
                address: "Sol1".to_string(),
                native_balance: "5".to_string(),
                token_balance: "100".to_string(),
                last_receipt: None,
            }
        ));

        // a slow completion from the older operation must not win
        assert!(!cell.publish(
            stale,
            UiState::Ready {
                recovery_available: false
            }
        ));
        assert!(matches!(cell.current(), UiState::WalletActive { .. }));
    }

    #[test]
    fn subscribers_observe_publications() {
        let cell = StateCell::new(UiState::Loading);
        let rx = cell.subscribe();
        let token = cell.begin();
        cell.publish(
            token,
            UiState::Failed {
                message: "boom".to_string(),
            },
        );
        assert_eq!(
            *rx.borrow(),
            UiState::Failed {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn token_stays_valid_across_multiple_publications() {
        let cell = StateCell::new(UiState::Loading);
        let token = cell.begin();
        assert!(cell.publish(token, UiState::Loading));
        assert!(cell.publish(
            token,
            UiState::Ready {
                recovery_available: false
            }
        ));
    }
}

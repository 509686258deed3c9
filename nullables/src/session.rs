//! Nullable wallet session: scripted transfers, recorded calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use luvpay_types::{ChainAddress, TokenAmount, TokenId, TxHash};
use luvpay_wallet_core::{Balance, TransferReceipt, WalletError, WalletSession};

/// One recorded `transfer` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferCall {
    pub to: ChainAddress,
    pub amount: String,
    pub token: TokenId,
}

/// An in-memory wallet session for testing.
///
/// Transfers succeed with a deterministic hash (the call number n,
/// big-endian, in the last eight bytes) unless an outcome was scripted with [`fail_next`] or
/// [`succeed_next`]. Thread-safe so it satisfies the `Send + Sync` bound.
///
/// [`fail_next`]: NullWalletSession::fail_next
/// [`succeed_next`]: NullWalletSession::succeed_next
pub struct NullWalletSession {
    address: Option<ChainAddress>,
    symbol: String,
    balance: Mutex<TokenAmount>,
    balance_error: Mutex<Option<String>>,
    outcomes: Mutex<VecDeque<Result<TxHash, String>>>,
    transfers: Mutex<Vec<TransferCall>>,
}

impl NullWalletSession {
    /// A connected session holding `balance` of the native token.
    pub fn connected(address: ChainAddress, balance: TokenAmount) -> Self {
        Self::build(Some(address), balance)
    }

    /// A session with no wallet connected.
    pub fn disconnected() -> Self {
        Self::build(None, TokenAmount::ZERO)
    }

    fn build(address: Option<ChainAddress>, balance: TokenAmount) -> Self {
        Self {
            address,
            symbol: "MATIC".to_string(),
            balance: Mutex::new(balance),
            balance_error: Mutex::new(None),
            outcomes: Mutex::new(VecDeque::new()),
            transfers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn set_balance(&self, balance: TokenAmount) {
        *self.balance.lock().unwrap() = balance;
    }

    /// Make every balance query fail with `message` until cleared.
    pub fn fail_balance(&self, message: Option<&str>) {
        *self.balance_error.lock().unwrap() = message.map(str::to_string);
    }

    /// Script the next transfer to fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Err(message.into()));
    }

    /// Script the next transfer to succeed with `hash`.
    pub fn succeed_next(&self, hash: TxHash) {
        self.outcomes.lock().unwrap().push_back(Ok(hash));
    }

    /// All transfer calls made so far (for assertions).
    pub fn transfers(&self) -> Vec<TransferCall> {
        self.transfers.lock().unwrap().clone()
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletSession for NullWalletSession {
    fn address(&self) -> Option<ChainAddress> {
        self.address.clone()
    }

    async fn balance(&self, token: &TokenId) -> Result<Balance, WalletError> {
        if self.address.is_none() {
            return Err(WalletError::NotConnected);
        }
        if !token.is_native() {
            return Err(WalletError::UnsupportedToken(token.to_string()));
        }
        if let Some(message) = self.balance_error.lock().unwrap().clone() {
            return Err(WalletError::Rpc(message));
        }
        Ok(Balance {
            display_value: *self.balance.lock().unwrap(),
            symbol: self.symbol.clone(),
        })
    }

    async fn transfer(
        &self,
        to: &ChainAddress,
        amount: &str,
        token: &TokenId,
    ) -> Result<TransferReceipt, WalletError> {
        if self.address.is_none() {
            return Err(WalletError::NotConnected);
        }
        let call_index = {
            let mut transfers = self.transfers.lock().unwrap();
            transfers.push(TransferCall {
                to: to.clone(),
                amount: amount.to_string(),
                token: token.clone(),
            });
            transfers.len()
        };

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(hash)) => Ok(TransferReceipt {
                transaction_hash: hash,
            }),
            Some(Err(message)) => Err(WalletError::Other(message)),
            None => Ok(TransferReceipt {
                transaction_hash: counter_hash(call_index as u64),
            }),
        }
    }
}

fn counter_hash(n: u64) -> TxHash {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    TxHash::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ChainAddress {
        ChainAddress::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    #[tokio::test]
    async fn records_transfers_and_follows_script() {
        let session = NullWalletSession::connected(address(), TokenAmount::ZERO);
        session.fail_next("user rejected transaction");

        let first = session.transfer(&address(), "1", &TokenId::Native).await;
        assert_eq!(first.unwrap_err().to_string(), "user rejected transaction");

        let second = session.transfer(&address(), "2", &TokenId::Native).await.unwrap();
        assert_eq!(second.transaction_hash, counter_hash(2));

        let calls = session.transfers();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].amount, "2");
    }

    #[tokio::test]
    async fn default_hashes_stay_unique_past_255_calls() {
        let session = NullWalletSession::connected(address(), TokenAmount::ZERO);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            let receipt = session.transfer(&address(), "1", &TokenId::Native).await.unwrap();
            assert!(seen.insert(receipt.transaction_hash));
        }
        assert_eq!(session.transfer_count(), 300);
    }

    #[tokio::test]
    async fn balance_reflects_updates() {
        let session = NullWalletSession::connected(address(), TokenAmount::ZERO).with_symbol("ETH");
        session.set_balance(TokenAmount::parse("25").unwrap());
        let balance = session.balance(&TokenId::Native).await.unwrap();
        assert_eq!(balance.display_value.to_string(), "25");
        assert_eq!(balance.symbol, "ETH");

        session.fail_balance(Some("node unreachable"));
        assert!(session.balance(&TokenId::Native).await.is_err());
    }

    #[tokio::test]
    async fn disconnected_session_refuses_calls() {
        let session = NullWalletSession::disconnected();
        assert!(session.address().is_none());
        assert!(matches!(
            session.balance(&TokenId::Native).await,
            Err(WalletError::NotConnected)
        ));
    }
}

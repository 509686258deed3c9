//! Wallet session contract.
//!
//! A wallet session is whatever holds the user's keys: a browser extension,
//! an embedded wallet, or a node-managed account. The payment flow only
//! needs the three operations below.

use async_trait::async_trait;
use luvpay_types::{ChainAddress, TokenAmount, TokenId, TxHash};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Balance of one token for the session's account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Amount in display units.
    pub display_value: TokenAmount,
    /// Currency symbol, e.g. `MATIC`.
    pub symbol: String,
}

/// Outcome of a mined transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transaction_hash: TxHash,
}

#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Address of the connected account, `None` when disconnected.
    fn address(&self) -> Option<ChainAddress>;

    /// Balance of `token` held by the connected account.
    async fn balance(&self, token: &TokenId) -> Result<Balance, WalletError>;

    /// Transfer `amount` (display units, as typed) of `token` to `to`.
    ///
    /// Resolves once the transaction has a receipt.
    async fn transfer(
        &self,
        to: &ChainAddress,
        amount: &str,
        token: &TokenId,
    ) -> Result<TransferReceipt, WalletError>;
}

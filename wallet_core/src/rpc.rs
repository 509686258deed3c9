//! Ethereum JSON-RPC wallet session.
//!
//! Talks to a node that manages the account's key itself (a dev node such as
//! anvil or geth `--dev`, or a node with an unlocked account). The node signs
//! `eth_sendTransaction`; this crate never sees a private key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use luvpay_types::{ChainAddress, TokenAmount, TokenId, TxHash};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::WalletError;
use crate::session::{Balance, TransferReceipt, WalletSession};

// ── RpcClient ───────────────────────────────────────────────────────────

/// HTTP client for an Ethereum JSON-RPC endpoint.
pub struct RpcClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a new client targeting the given URL (e.g. `http://127.0.0.1:8545`).
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Rpc(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The configured RPC URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = request_body(id, method, params);
        tracing::trace!(method, id, "rpc request");

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Rpc(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Rpc(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| WalletError::Rpc(format!("invalid JSON response: {e}")))?;

        extract_result(json)
    }

    /// `eth_getBalance` at the latest block, in wei.
    pub async fn get_balance(&self, account: &ChainAddress) -> Result<u128, WalletError> {
        let result = self
            .call("eth_getBalance", json!([account.as_str(), "latest"]))
            .await?;
        let quantity = result
            .as_str()
            .ok_or_else(|| WalletError::Rpc("eth_getBalance returned a non-string".into()))?;
        parse_quantity(quantity)
    }

    /// `eth_sendTransaction` for a plain value transfer.
    pub async fn send_transaction(
        &self,
        from: &ChainAddress,
        to: &ChainAddress,
        value_wei: u128,
    ) -> Result<TxHash, WalletError> {
        let tx = json!({
            "from": from.as_str(),
            "to": to.as_str(),
            "value": format_quantity(value_wei),
        });
        let result = self.call("eth_sendTransaction", json!([tx])).await?;
        let hash = result
            .as_str()
            .ok_or_else(|| WalletError::Rpc("eth_sendTransaction returned a non-string".into()))?;
        Ok(TxHash::parse(hash)?)
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    pub async fn get_receipt(&self, hash: &TxHash) -> Result<Option<RpcReceipt>, WalletError> {
        let result = self
            .call("eth_getTransactionReceipt", json!([hash.to_string()]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| WalletError::Rpc(format!("invalid receipt: {e}")))
    }
}

/// Subset of a transaction receipt the wallet cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
}

impl RpcReceipt {
    /// Pre-Byzantium receipts have no status; treat them as successful.
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() != Some("0x0")
    }
}

fn request_body(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

fn extract_result(mut json: Value) -> Result<Value, WalletError> {
    if let Some(err) = json.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(WalletError::Rpc(message));
    }
    match json.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(WalletError::Rpc("response has neither result nor error".into())),
    }
}

/// Parse a hex quantity such as `0x1bc16d674ec80000`.
pub fn parse_quantity(raw: &str) -> Result<u128, WalletError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| WalletError::Rpc(format!("quantity without 0x prefix: {raw}")))?;
    if digits.is_empty() {
        return Err(WalletError::Rpc(format!("empty quantity: {raw}")));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| WalletError::Rpc(format!("invalid quantity {raw}: {e}")))
}

/// Encode a quantity as minimal hex.
pub fn format_quantity(value: u128) -> String {
    format!("0x{value:x}")
}

// ── RpcWalletSession ────────────────────────────────────────────────────

/// [`WalletSession`] backed by a node-managed account.
pub struct RpcWalletSession {
    client: RpcClient,
    account: Option<ChainAddress>,
    symbol: String,
    receipt_poll: Duration,
}

impl RpcWalletSession {
    pub fn new(
        client: RpcClient,
        account: Option<ChainAddress>,
        symbol: impl Into<String>,
        receipt_poll: Duration,
    ) -> Self {
        Self {
            client,
            account,
            symbol: symbol.into(),
            receipt_poll,
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    fn account(&self) -> Result<&ChainAddress, WalletError> {
        self.account.as_ref().ok_or(WalletError::NotConnected)
    }
}

#[async_trait]
impl WalletSession for RpcWalletSession {
    fn address(&self) -> Option<ChainAddress> {
        self.account.clone()
    }

    async fn balance(&self, token: &TokenId) -> Result<Balance, WalletError> {
        if !token.is_native() {
            return Err(WalletError::UnsupportedToken(token.to_string()));
        }
        let wei = self.client.get_balance(self.account()?).await?;
        Ok(Balance {
            display_value: TokenAmount::from_wei(wei)?,
            symbol: self.symbol.clone(),
        })
    }

    async fn transfer(
        &self,
        to: &ChainAddress,
        amount: &str,
        token: &TokenId,
    ) -> Result<TransferReceipt, WalletError> {
        if !token.is_native() {
            return Err(WalletError::UnsupportedToken(token.to_string()));
        }
        let from = self.account()?;
        let wei = TokenAmount::parse(amount)?.to_wei()?;

        let hash = self.client.send_transaction(from, to, wei).await?;
        tracing::info!(%hash, %to, amount, "transaction submitted, waiting for receipt");

        loop {
            if let Some(receipt) = self.client.get_receipt(&hash).await? {
                if !receipt.succeeded() {
                    return Err(WalletError::Reverted(receipt.transaction_hash));
                }
                tracing::info!(%hash, block = ?receipt.block_number, "transaction mined");
                return Ok(TransferReceipt {
                    transaction_hash: hash,
                });
            }
            tokio::time::sleep(self.receipt_poll).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_round_trip() {
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(
            parse_quantity("0x1bc16d674ec80000").unwrap(),
            2_000_000_000_000_000_000
        );
        assert_eq!(format_quantity(255), "0xff");
        assert_eq!(format_quantity(0), "0x0");
    }

    #[test]
    fn quantity_rejects_malformed() {
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("1234").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn request_body_is_jsonrpc_2() {
        let body = request_body(7, "eth_chainId", json!([]));
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 7);
        assert_eq!(body["method"], "eth_chainId");
    }

    #[test]
    fn extract_result_surfaces_node_message() {
        let err = extract_result(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "insufficient funds for gas * price + value" }
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "node RPC error: insufficient funds for gas * price + value"
        );
    }

    #[test]
    fn extract_result_keeps_null_result() {
        let result = extract_result(json!({ "jsonrpc": "2.0", "id": 1, "result": null })).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn receipt_status() {
        let ok: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": "0x01",
            "status": "0x1",
            "blockNumber": "0x10"
        }))
        .unwrap();
        assert!(ok.succeeded());

        let reverted: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": "0x01",
            "status": "0x0"
        }))
        .unwrap();
        assert!(!reverted.succeeded());
    }

    #[test]
    fn client_creation() {
        let client = RpcClient::new("http://127.0.0.1:8545").unwrap();
        assert_eq!(client.rpc_url(), "http://127.0.0.1:8545");
    }

    #[tokio::test]
    async fn disconnected_session_reports_not_connected() {
        let session = RpcWalletSession::new(
            RpcClient::new("http://127.0.0.1:8545").unwrap(),
            None,
            "ETH",
            Duration::from_millis(10),
        );
        assert!(session.address().is_none());
        let err = session.balance(&TokenId::Native).await.unwrap_err();
        assert!(matches!(err, WalletError::NotConnected));
    }

    #[tokio::test]
    async fn contract_tokens_are_rejected() {
        let account = ChainAddress::parse("0x1111111111111111111111111111111111111111").unwrap();
        let session = RpcWalletSession::new(
            RpcClient::new("http://127.0.0.1:8545").unwrap(),
            Some(account.clone()),
            "ETH",
            Duration::from_millis(10),
        );
        let token = TokenId::Contract(account.clone());
        let err = session.transfer(&account, "1", &token).await.unwrap_err();
        assert!(matches!(err, WalletError::UnsupportedToken(_)));
    }
}

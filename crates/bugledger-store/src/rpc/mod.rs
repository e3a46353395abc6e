//! [`BugStore`] backed by a contract on an Ethereum JSON-RPC node.

pub mod wire;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use crate::BugStore;
use crate::abi::{self, Token};
use crate::error::StoreError;
use crate::types::{Address, BugDraft, BugRecord};
use wire::{CallObject, Receipt, RpcRequest, RpcResponse};

pub const DEFAULT_RPC_URL: &str = "http://localhost:7545";
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 250;
pub const DEFAULT_RECEIPT_MAX_ATTEMPTS: u32 = 40;

/// Where the contract lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub url: Url,
    pub contract: Address,
    /// Which entry of `eth_accounts` acts as the caller.
    pub account_index: usize,
    pub gas_limit: u64,
    pub request_timeout: Duration,
    pub receipt_poll_interval: Duration,
    pub receipt_max_attempts: u32,
}

impl RpcConfig {
    pub fn new(url: Url, contract: Address) -> Self {
        Self {
            url,
            contract,
            account_index: 0,
            gas_limit: DEFAULT_GAS_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            receipt_poll_interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
            receipt_max_attempts: DEFAULT_RECEIPT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug)]
pub struct RpcBugStore {
    client: Client,
    config: RpcConfig,
    next_id: AtomicU64,
}

impl RpcBugStore {
    pub fn new(config: RpcConfig) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: RpcConfig) -> Self {
        Self {
            client,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest::new(id, method, params);
        let request = serde_json::to_string(&body).unwrap_or_default();
        tracing::trace!(target: "rpc_json", %request);

        let resp = self
            .client
            .post(self.config.url.clone())
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::trace!(target: "rpc_json", %method, %status, response = %text);

        let parsed: RpcResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(StoreError::Transport {
                    message: format!("HTTP {status} from {}", self.config.url),
                    is_timeout: false,
                });
            }
            Err(e) => {
                return Err(StoreError::Decode(format!(
                    "invalid JSON-RPC response to {method}: {e}"
                )));
            }
        };

        if let Some(err) = parsed.error {
            return Err(StoreError::Rejected {
                code: err.code,
                message: err.describe(),
            });
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }

    /// Caller identity, looked up fresh for every store operation.
    async fn caller(&self) -> Result<String, StoreError> {
        let accounts = self.request("eth_accounts", json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(accounts)
            .map_err(|e| StoreError::Decode(format!("eth_accounts: {e}")))?;
        accounts
            .into_iter()
            .nth(self.config.account_index)
            .ok_or(StoreError::NoAccount)
    }

    async fn call(&self, from: String, data: Vec<u8>) -> Result<Vec<u8>, StoreError> {
        let call = CallObject {
            from,
            to: self.config.contract.to_string(),
            gas: None,
            data: abi::encode_hex(&data),
        };
        let result = self.request("eth_call", json!([call, "latest"])).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| StoreError::Decode(format!("eth_call returned {result}")))?;
        let bytes = abi::decode_hex(hex)?;
        if bytes.is_empty() {
            return Err(StoreError::Decode(format!(
                "empty return data; is there a contract at {}?",
                self.config.contract
            )));
        }
        Ok(bytes)
    }

    /// Sends a transaction and waits for it to be mined.
    async fn transact(&self, from: String, data: Vec<u8>) -> Result<(), StoreError> {
        let tx = CallObject {
            from,
            to: self.config.contract.to_string(),
            gas: Some(abi::encode_quantity(self.config.gas_limit)),
            data: abi::encode_hex(&data),
        };
        let result = self.request("eth_sendTransaction", json!([tx])).await?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| StoreError::Decode(format!("eth_sendTransaction returned {result}")))?
            .to_string();
        tracing::debug!(%tx_hash, "transaction submitted");
        self.await_receipt(tx_hash).await
    }

    async fn await_receipt(&self, tx_hash: String) -> Result<(), StoreError> {
        for attempt in 0..self.config.receipt_max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.config.receipt_poll_interval).await;
            }
            let result = self
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;
            if result.is_null() {
                continue;
            }
            let receipt: Receipt = serde_json::from_value(result)
                .map_err(|e| StoreError::Decode(format!("transaction receipt: {e}")))?;
            return match receipt.status.as_deref().map(abi::decode_quantity) {
                Some(Ok(0)) => Err(StoreError::Reverted { tx_hash }),
                Some(Err(e)) => Err(e),
                Some(Ok(_)) | None => {
                    tracing::debug!(%tx_hash, attempts = attempt + 1, "transaction confirmed");
                    Ok(())
                }
            };
        }
        Err(StoreError::Timeout { tx_hash })
    }

    /// A rejected index-addressed call is reported as stale when a fresh
    /// count shows the index no longer exists.
    async fn classify_index_failure(&self, err: StoreError, index: u64) -> StoreError {
        if !matches!(err, StoreError::Rejected { .. } | StoreError::Reverted { .. }) {
            return err;
        }
        match self.count().await {
            Ok(count) if index >= count => StoreError::StaleIndex { index, count },
            _ => err,
        }
    }
}

#[async_trait]
impl BugStore for RpcBugStore {
    #[instrument(skip(self), level = "debug")]
    async fn count(&self) -> Result<u64, StoreError> {
        let from = self.caller().await?;
        let data = self
            .call(from, abi::encode_call(abi::GET_BUG_COUNT, &[]))
            .await?;
        abi::decode_u64(&data, 0)
    }

    #[instrument(skip(self), level = "debug")]
    async fn read_at(&self, index: u64) -> Result<BugRecord, StoreError> {
        let from = self.caller().await?;
        let calldata = abi::encode_call(abi::GET_TASK, &[Token::Uint(index)]);
        match self.call(from, calldata).await {
            Ok(data) => abi::decode_bug_record(&data),
            Err(e) => Err(self.classify_index_failure(e, index).await),
        }
    }

    #[instrument(skip(self, draft), fields(bug_id = %draft.bug_id), level = "debug")]
    async fn add(&self, draft: &BugDraft) -> Result<(), StoreError> {
        let from = self.caller().await?;
        let calldata = abi::encode_call(
            abi::ADD_BUG,
            &[
                Token::String(draft.bug_id.clone()),
                Token::String(draft.description.clone()),
                Token::Uint(u64::from(draft.criticality.ordinal())),
                Token::Bool(draft.is_done),
            ],
        );
        self.transact(from, calldata).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_at(&self, index: u64) -> Result<(), StoreError> {
        let from = self.caller().await?;
        let calldata = abi::encode_call(abi::DELETE_BUG, &[Token::Uint(index)]);
        match self.transact(from, calldata).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.classify_index_failure(e, index).await),
        }
    }
}

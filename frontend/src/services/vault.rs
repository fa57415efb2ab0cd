//! Vault `vote` transactions through the browser wallet.
//!
//! The wallet signs and broadcasts; confirmation is detected by polling
//! `eth_getTransactionReceipt`.

use gloo_timers::future::TimeoutFuture;
use nftree_core::{ContractWriter, TxError, VoteTransaction};
use serde::Deserialize;
use wasm_bindgen_futures::JsFuture;

use super::wallet::{get_transaction_receipt, js_error_message, send_transaction, tx_error_from_js};
use crate::config::{RECEIPT_MAX_POLLS, RECEIPT_POLL_INTERVAL_MS};

/// Fields read from an `eth_getTransactionReceipt` result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Receipt {
    transaction_hash: Option<String>,
    status: Option<String>,
}

/// What a single receipt poll says about the transaction.
#[derive(Debug, PartialEq, Eq)]
enum ReceiptPoll {
    Waiting,
    Confirmed,
    Reverted,
}

/// A failed lookup is retried on the next poll; only a mined receipt settles.
fn read_poll(hash: &str, fetched: Result<Option<Receipt>, String>) -> ReceiptPoll {
    match fetched {
        Err(e) => {
            log::warn!("⚠️  Receipt lookup for {} failed, retrying: {}", hash, e);
            ReceiptPoll::Waiting
        }
        Ok(None) => ReceiptPoll::Waiting,
        Ok(Some(receipt)) if receipt_succeeded(receipt.status.as_deref()) => {
            log::info!(
                "✅ Confirmed {}",
                receipt.transaction_hash.as_deref().unwrap_or(hash)
            );
            ReceiptPoll::Confirmed
        }
        Ok(Some(_)) => ReceiptPoll::Reverted,
    }
}

async fn fetch_receipt(hash: &str) -> Result<Option<Receipt>, String> {
    let receipt = JsFuture::from(get_transaction_receipt(hash))
        .await
        .map_err(|e| js_error_message(&e))?;
    if receipt.is_null() || receipt.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(receipt)
        .map(Some)
        .map_err(|e| format!("unreadable receipt: {}", e))
}

/// Contract writer backed by the injected wallet.
pub struct WalletWriter {
    poll_interval_ms: u32,
    max_polls: u32,
}

impl WalletWriter {
    pub fn new() -> Self {
        Self {
            poll_interval_ms: RECEIPT_POLL_INTERVAL_MS,
            max_polls: RECEIPT_MAX_POLLS,
        }
    }

    async fn wait_for_receipt(&self, hash: &str) -> Result<(), TxError> {
        for _ in 0..self.max_polls {
            TimeoutFuture::new(self.poll_interval_ms).await;

            match read_poll(hash, fetch_receipt(hash).await) {
                ReceiptPoll::Waiting => continue,
                ReceiptPoll::Confirmed => return Ok(()),
                ReceiptPoll::Reverted => {
                    return Err(TxError::message(format!("Transaction {} reverted", hash)))
                }
            }
        }

        Err(TxError::message(format!(
            "Transaction {} not confirmed after {} polls",
            hash, self.max_polls
        )))
    }
}

impl Default for WalletWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractWriter for WalletWriter {
    async fn send_vote(&self, tx: &VoteTransaction) -> Result<String, TxError> {
        log::info!("📤 Sending vote to {}...", tx.to);

        let hash = JsFuture::from(send_transaction(&tx.from, &tx.to, &tx.data))
            .await
            .map_err(|e| tx_error_from_js(&e))?
            .as_string()
            .ok_or_else(|| TxError::message("Wallet returned no transaction hash"))?;

        log::info!("⏳ Waiting for {}", hash);
        self.wait_for_receipt(&hash).await?;
        Ok(hash)
    }
}

/// Receipt status `0x1` is success. Pre-Byzantium receipts carry no status.
pub fn receipt_succeeded(status: Option<&str>) -> bool {
    match status {
        None => true,
        Some(s) => matches!(s, "0x1" | "0x01"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: Option<&str>) -> Receipt {
        Receipt {
            transaction_hash: Some("0xfeed".into()),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_receipt_status() {
        assert!(receipt_succeeded(Some("0x1")));
        assert!(receipt_succeeded(None));
        assert!(!receipt_succeeded(Some("0x0")));
    }

    #[test]
    fn test_lookup_error_keeps_polling() {
        let poll = read_poll("0xfeed", Err("Internal JSON-RPC error.".into()));
        assert_eq!(poll, ReceiptPoll::Waiting);
    }

    #[test]
    fn test_unmined_then_mined() {
        assert_eq!(read_poll("0xfeed", Ok(None)), ReceiptPoll::Waiting);
        assert_eq!(read_poll("0xfeed", Ok(Some(receipt(Some("0x1"))))), ReceiptPoll::Confirmed);
        assert_eq!(read_poll("0xfeed", Ok(Some(receipt(Some("0x0"))))), ReceiptPoll::Reverted);
    }
}

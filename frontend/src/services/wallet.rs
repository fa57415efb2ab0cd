//! EIP-1193 wallet wrapper (MetaMask, Rabby, Coinbase Wallet, ...).

use nftree_core::TxError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::types::{AppError, AppResult};

/// Rust wrapper for the injected `window.ethereum` provider.
pub struct EthereumWallet;

impl EthereumWallet {
    /// Whether a provider is injected.
    pub fn is_available() -> bool {
        let available = has_provider();
        if !available {
            log::warn!("⚠️  No Ethereum provider found");
        }
        available
    }

    /// Ask the wallet for access and return the first account.
    pub async fn connect() -> AppResult<String> {
        if !Self::is_available() {
            return Err(AppError::Wallet(
                "No Ethereum wallet found. Please install MetaMask or another browser wallet."
                    .to_string(),
            ));
        }

        log::info!("🔌 Connecting to wallet...");

        let result = JsFuture::from(request_accounts())
            .await
            .map_err(|e| AppError::Wallet(js_error_message(&e)))?;

        let address = first_account(&result)
            .ok_or_else(|| AppError::Wallet("Wallet returned no account".to_string()))?;

        log::info!("✅ Connected to wallet: {}", address);
        Ok(address)
    }

    /// Account already authorized for this site, without prompting.
    pub async fn authorized_account() -> Option<String> {
        if !has_provider() {
            return None;
        }
        match JsFuture::from(get_accounts()).await {
            Ok(accounts) => first_account(&accounts),
            Err(e) => {
                log::warn!("Could not read accounts: {}", js_error_message(&e));
                None
            }
        }
    }

    /// Call `on_change` with the new first account whenever the wallet switches.
    pub fn watch_accounts(on_change: impl FnMut(Option<String>) + 'static) {
        let mut on_change = on_change;
        let callback = Closure::wrap(Box::new(move |account: JsValue| {
            on_change(account.as_string());
        }) as Box<dyn FnMut(JsValue)>);

        on_accounts_changed(callback.as_ref().unchecked_ref());
        // Lives for the whole app
        callback.forget();
    }
}

fn first_account(accounts: &JsValue) -> Option<String> {
    js_sys::Array::from(accounts).get(0).as_string()
}

fn reflect(value: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_null() && !v.is_undefined())
}

/// Message of a thrown JS value.
pub(crate) fn js_error_message(err: &JsValue) -> String {
    reflect(err, "message")
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "Unknown JS error".to_string())
}

/// Structured view of a provider error.
///
/// Providers nest the RPC error under `data`:
/// `{ code: -32603, message, data: { code: 3, message, data: "0x..." } }`.
pub(crate) fn tx_error_from_js(err: &JsValue) -> TxError {
    let code = reflect(err, "code").and_then(|v| v.as_f64()).map(|c| c as i64);
    let mut message = js_error_message(err);
    let mut data = None;

    if let Some(inner) = reflect(err, "data") {
        if let Some(hex) = inner.as_string() {
            data = Some(hex);
        } else {
            data = reflect(&inner, "data").and_then(|v| v.as_string());
            if let Some(inner_message) = reflect(&inner, "message").and_then(|v| v.as_string()) {
                message = format!("{}: {}", message, inner_message);
            }
        }
    }

    TxError {
        code,
        message,
        data,
    }
}

/// JavaScript functions from ethereum.js
#[wasm_bindgen(module = "/src/js/ethereum.js")]
extern "C" {
    #[wasm_bindgen(js_name = "hasProvider")]
    fn has_provider() -> bool;

    #[wasm_bindgen(js_name = "requestAccounts")]
    fn request_accounts() -> js_sys::Promise;

    #[wasm_bindgen(js_name = "getAccounts")]
    fn get_accounts() -> js_sys::Promise;

    #[wasm_bindgen(js_name = "onAccountsChanged")]
    fn on_accounts_changed(callback: &js_sys::Function);

    #[wasm_bindgen(js_name = "sendTransaction")]
    pub(crate) fn send_transaction(from: &str, to: &str, data: &str) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "getTransactionReceipt")]
    pub(crate) fn get_transaction_receipt(hash: &str) -> js_sys::Promise;
}

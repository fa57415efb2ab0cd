use leptos::*;
use crate::services::wallet::EthereumWallet;
use crate::APP_NAME;

/// `0x1234...abcd`
fn short_address(addr: &str) -> String {
    if addr.len() <= 10 {
        return addr.to_string();
    }
    format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
}

#[component]
pub fn Header(
    wallet_address: ReadSignal<Option<String>>,
    set_wallet_address: WriteSignal<Option<String>>,
) -> impl IntoView {
    let (error, set_error) = create_signal(None::<String>);

    // Pick up an account the user already authorized, then follow switches
    spawn_local(async move {
        if let Some(account) = EthereumWallet::authorized_account().await {
            log::info!("🔑 Restored wallet session: {}", account);
            set_wallet_address.set(Some(account));
        }
    });
    if EthereumWallet::is_available() {
        EthereumWallet::watch_accounts(move |account| {
            log::info!("🔄 Wallet account changed: {:?}", account);
            set_wallet_address.set(account);
        });
    }

    // Connect on click; a connected wallet is managed from the extension
    let on_wallet_click = move |_| {
        if wallet_address.get_untracked().is_some() {
            return;
        }
        log::info!("🔑 Attempting to connect wallet...");
        set_error.set(None);

        spawn_local(async move {
            match EthereumWallet::connect().await {
                Ok(account) => set_wallet_address.set(Some(account)),
                Err(e) => {
                    log::error!("❌ Wallet connection failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <header class="flex items-center justify-between py-4">
            <div class="header-left">
                <a href="/" class="logo text-xl font-bold text-gray-900">{APP_NAME}</a>
            </div>
            <div class="header-right flex items-center gap-3">
                {move || error.get().map(|e| view! {
                    <span class="text-xs text-red-500">{e}</span>
                })}
                <button
                    class="wallet-status rounded-md bg-white px-4 py-1.5 text-sm font-semibold shadow ring-1 ring-gray-300"
                    class:connected=move || wallet_address.get().is_some()
                    on:click=on_wallet_click
                >
                    {move || match wallet_address.get() {
                        Some(addr) => short_address(&addr),
                        None => "Connect Wallet".to_string(),
                    }}
                </button>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234...5678"
        );
        assert_eq!(short_address("0x12"), "0x12");
    }
}

//! NFTree - Frontend Rust/Leptos Application
//!
//! A WebAssembly page listing the NFTree collections held by the connected
//! wallet, with an on-chain attestation (`vote`) per row.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (wallet connection)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /                    HomePage                           │
//! │  │   ├── HomeCta                                             │
//! │  │   └── TableShimmer | AttestRow* | error panel             │
//! │  └── /collections/:edition CollectionDetail                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Shared state and errors
//! - [`components`] - UI components (Header, HomePage, AttestRow, etc.)
//! - [`services`] - Indexer, wallet, vault and storage access

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use nftree_core::AttestationCache;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{AppError, AppResult, AttestedEditions, BrowserCache, HomeState, WalletState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Global state for the application
    let wallet = WalletState::new();
    provide_context(wallet);
    provide_context(HomeState::new());
    let cache: BrowserCache = AttestationCache::new(BrowserStore::open());
    let attested = cache.attested().unwrap_or_else(|e| {
        log::warn!("⚠️  Attestation cache unreadable: {}", e);
        Vec::new()
    });
    provide_context(AttestedEditions::new(&attested));
    provide_context(cache);

    let (wallet_address, set_wallet_address) = wallet.address.split();

    view! {
        <Title formatter=|page: String| format!("{} | {}", page, APP_NAME)/>
        <Router>
            <div class="container mx-auto max-w-5xl px-4">
                <Header wallet_address=wallet_address set_wallet_address=set_wallet_address/>
            </div>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/collections/:edition" view=CollectionDetail/>
                </Routes>
            </main>
            <div class="container mx-auto max-w-5xl px-4">
                <Footer/>
            </div>
        </Router>
    }
}

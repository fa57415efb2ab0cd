//! Home page: the connected wallet's collections with an attest button per row

use leptos::*;
use leptos_meta::Title;
use nftree_core::{address_key, load_home, HomeData};

use super::{AttestRow, HomeCta, TableShimmer};
use crate::config::INDEXER_URL;
use crate::services::GraphQlIndexer;
use crate::types::{AppError, AppResult, BrowserCache, HomeState, WalletState};

/// A finished load, tagged with the account it was made for.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeLoad {
    pub owner: String,
    pub result: AppResult<HomeData>,
}

/// What the home page renders.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    ConnectPrompt,
    Loading,
    Table { owner: String, data: HomeData },
    Error(AppError),
}

impl HomeView {
    /// Pick the view for the connected account.
    ///
    /// A load still running, or one made for another account, shows the
    /// placeholder rather than stale rows.
    pub fn select(address: Option<&str>, loading: bool, loaded: Option<&HomeLoad>) -> Self {
        let Some(address) = address else {
            return HomeView::ConnectPrompt;
        };
        if loading {
            return HomeView::Loading;
        }
        match loaded {
            Some(load) if address_key(&load.owner) == address_key(address) => match &load.result {
                Ok(data) => HomeView::Table {
                    owner: load.owner.clone(),
                    data: data.clone(),
                },
                Err(e) => HomeView::Error(e.clone()),
            },
            _ => HomeView::Loading,
        }
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let wallet = expect_context::<WalletState>();
    let home = expect_context::<HomeState>();
    let cache = expect_context::<BrowserCache>();

    // Refetch whenever the connected account changes
    let rows = create_local_resource(
        move || wallet.address.get(),
        move |owner| {
            let cache = cache.clone();
            async move {
                // The details route must not see the previous account's tokens
                home.data.set(None);
                let Some(owner) = owner else {
                    return None;
                };
                let indexer = GraphQlIndexer::new(INDEXER_URL);
                let result: AppResult<HomeData> = load_home(&indexer, &cache, &owner)
                    .await
                    .map_err(AppError::from);
                match &result {
                    Ok(data) => home.data.set(Some(data.clone())),
                    Err(e) => log::error!("❌ Failed to load collections: {}", e),
                }
                Some(HomeLoad { owner, result })
            }
        },
    );

    let view_state = create_memo(move |_| {
        let loaded = rows.get().flatten();
        wallet
            .address
            .with(|address| HomeView::select(address.as_deref(), rows.loading().get(), loaded.as_ref()))
    });

    view! {
        <Title text="Home"/>
        <div class="container mx-auto max-w-5xl px-4">
            <HomeCta/>
            <div class="mt-8 sm:flex sm:items-center">
                <div class="sm:flex-auto">
                    <h1 class="text-base font-semibold leading-6 text-gray-900">"My Collections"</h1>
                </div>
            </div>
            {move || match view_state.get() {
                HomeView::ConnectPrompt => view! { <ConnectPrompt/> }.into_view(),
                HomeView::Loading => view! { <TableShimmer/> }.into_view(),
                HomeView::Table { owner, data } => view! { <CollectionsTable owner=owner data=data/> }.into_view(),
                HomeView::Error(e) => view! { <ErrorPanel error=e/> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn CollectionsTable(owner: String, data: HomeData) -> impl IntoView {
    if data.collections.is_empty() {
        return view! {
            <p class="mt-5 text-sm text-gray-500">"No NFTree collections in this wallet yet."</p>
        }
        .into_view();
    }

    let rows = data
        .collections
        .iter()
        .map(|collection| {
            let vault = data.vault_for(collection).map(str::to_string);
            view! { <AttestRow collection=collection.clone() vault=vault owner=owner.clone()/> }
        })
        .collect_view();

    view! {
        <div class="-mx-4 mt-5 ring-1 ring-gray-300 sm:mx-0 sm:rounded-lg">
            <table class="min-w-full divide-y divide-gray-300">
                <thead>
                    <tr>
                        <th scope="col" class="py-3.5 pl-4 pr-3 text-left text-sm font-semibold text-gray-900 sm:pl-6">"Collections"</th>
                        <th scope="col" class="px-3 py-3.5 text-left text-sm font-semibold text-gray-900">"TokenId"</th>
                        <th scope="col" class="relative py-3.5 pl-3 pr-4 text-right text-sm font-semibold text-gray-900 sm:pr-6">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200">{rows}</tbody>
            </table>
        </div>
    }
    .into_view()
}

#[component]
fn ConnectPrompt() -> impl IntoView {
    view! {
        <div class="mt-5 rounded-lg border border-dashed border-gray-300 p-8 text-center text-sm text-gray-500">
            "Connect your wallet to see your collections."
        </div>
    }
}

#[component]
fn ErrorPanel(error: AppError) -> impl IntoView {
    view! {
        <div class="mt-5 rounded-md bg-red-50 p-4 text-sm text-red-700" role="alert">
            <p class="font-semibold">"Could not load your collections"</p>
            <p class="mt-1">{error.to_string()}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nftree_core::Collection;

    const ALICE: &str = "0xA11CE00000000000000000000000000000000001";
    const BOB: &str = "0xb0b0000000000000000000000000000000000002";

    fn loaded(owner: &str, result: AppResult<HomeData>) -> HomeLoad {
        HomeLoad {
            owner: owner.to_string(),
            result,
        }
    }

    fn data_with_token(token_id: &str) -> HomeData {
        HomeData {
            collections: vec![Collection {
                edition_address: "0xed1".into(),
                token_id: token_id.into(),
                image_uri: None,
            }],
            ..HomeData::default()
        }
    }

    #[test]
    fn test_no_wallet_prompts_to_connect() {
        let load = loaded(ALICE, Ok(data_with_token("1")));
        assert_eq!(HomeView::select(None, false, Some(&load)), HomeView::ConnectPrompt);
        assert_eq!(HomeView::select(None, true, None), HomeView::ConnectPrompt);
    }

    #[test]
    fn test_loading_until_first_fetch_resolves() {
        assert_eq!(HomeView::select(Some(ALICE), true, None), HomeView::Loading);
        assert_eq!(HomeView::select(Some(ALICE), false, None), HomeView::Loading);
    }

    #[test]
    fn test_refetch_hides_previous_rows() {
        let previous = loaded(ALICE, Ok(data_with_token("1")));
        assert_eq!(HomeView::select(Some(BOB), true, Some(&previous)), HomeView::Loading);
    }

    #[test]
    fn test_rows_for_another_account_are_discarded() {
        let previous = loaded(ALICE, Ok(data_with_token("1")));
        assert_eq!(HomeView::select(Some(BOB), false, Some(&previous)), HomeView::Loading);
    }

    #[test]
    fn test_table_for_the_connected_account() {
        let data = data_with_token("7");
        let load = loaded(ALICE, Ok(data.clone()));

        // Wallets report checksummed or lowercased addresses
        let lowered = ALICE.to_lowercase();
        assert_eq!(
            HomeView::select(Some(&lowered), false, Some(&load)),
            HomeView::Table {
                owner: ALICE.to_string(),
                data,
            }
        );
    }

    #[test]
    fn test_fetch_error_shows_panel() {
        let err = AppError::Indexer("Indexer returned 502".into());
        let load = loaded(ALICE, Err(err.clone()));
        assert_eq!(HomeView::select(Some(ALICE), false, Some(&load)), HomeView::Error(err));
    }
}

//! One table row: artwork, collection link, token id and the attest button

use leptos::*;
use nftree_core::{
    address_key, attest, image_after_probe, needs_probe, resolve_image_uri, AttestStatus,
    Collection, VoteRequest, PLACEHOLDER_IMAGE,
};

use crate::config::IPFS_GATEWAY;
use crate::services::{probe_image, WalletWriter};
use crate::types::{AttestedEditions, BrowserCache, WalletState};

/// `owner` is the account the row was loaded for; votes are only sent from it.
#[component]
pub fn AttestRow(collection: Collection, vault: Option<String>, owner: String) -> impl IntoView {
    let wallet = expect_context::<WalletState>();
    let cache = expect_context::<BrowserCache>();
    let attested_editions = expect_context::<AttestedEditions>();

    // Own outcome, overridden once any row of this edition attests
    let (own_status, set_status) = create_signal(AttestStatus::Idle);
    let status = {
        let edition_address = collection.edition_address.clone();
        create_memo(move |_| {
            own_status
                .get()
                .with_edition_attested(attested_editions.contains(&edition_address))
        })
    };

    // Artwork: resolved URI first, placeholder if the probe comes back empty
    let resolved = resolve_image_uri(collection.image_uri.as_deref(), IPFS_GATEWAY);
    let (image, set_image) = create_signal(resolved.clone());
    if needs_probe(&resolved) {
        spawn_local(async move {
            let outcome = probe_image(&resolved).await;
            set_image.set(image_after_probe(&resolved, outcome));
        });
    }
    let on_image_error = move |_| {
        if image.get_untracked() != PLACEHOLDER_IMAGE {
            set_image.set(PLACEHOLDER_IMAGE.to_string());
        }
    };

    let owner_key = address_key(&owner);
    let is_owner = move || {
        wallet
            .address
            .with(|a| a.as_deref().map(address_key).as_deref() == Some(owner_key.as_str()))
    };
    let has_vault = vault.is_some();
    let disabled = {
        let is_owner = is_owner.clone();
        move || !has_vault || !is_owner() || !status.get().can_submit()
    };
    let tooltip = move || {
        if !has_vault {
            "No vault found for this collection"
        } else if !is_owner() {
            "Connect the wallet holding this token to attest"
        } else {
            ""
        }
    };

    let edition_address = collection.edition_address.clone();
    let token_id = collection.token_id.clone();
    let on_attest = move |_| {
        let (Some(vault), Some(voter)) = (vault.clone(), wallet.address.get_untracked()) else {
            return;
        };
        if address_key(&voter) != address_key(&owner) || !status.get_untracked().can_submit() {
            return;
        }

        let request = VoteRequest {
            edition_address: edition_address.clone(),
            token_id: token_id.clone(),
            vault,
            voter,
        };
        let cache = cache.clone();
        set_status.set(AttestStatus::Pending);
        spawn_local(async move {
            let outcome = attest(&WalletWriter::new(), &cache, &request).await;
            if outcome.is_attested() {
                attested_editions.insert(&request.edition_address);
            }
            set_status.set(outcome);
        });
    };

    let href = {
        let collection = collection.clone();
        move || collection.details_href(status.get().is_attested())
    };

    view! {
        <tr>
            <td class="relative py-4 pl-4 pr-3 text-sm sm:pl-6">
                <a href=href class="flex items-center gap-3 font-medium text-gray-900">
                    <img
                        class="h-9 w-9 rounded-full object-cover"
                        src=move || image.get()
                        alt=collection.edition_address.clone()
                        on:error=on_image_error
                    />
                    <div class="flex flex-col">
                        <span>"NFTree"</span>
                        <span class="font-mono text-xs text-gray-500">{collection.edition_address.clone()}</span>
                    </div>
                </a>
            </td>
            <td class="px-3 py-3.5 text-sm text-gray-500">{collection.token_id.clone()}</td>
            <td class="py-3.5 pl-3 pr-4 text-right text-sm font-medium sm:pr-6">
                <button
                    type="button"
                    class=move || {
                        format!(
                            "inline-flex items-center rounded-md px-3 py-2 text-sm font-semibold text-gray-900 shadow-sm ring-1 ring-inset ring-gray-300 disabled:cursor-not-allowed disabled:opacity-60 {}",
                            status.get().css_class(),
                        )
                    }
                    title=tooltip
                    disabled=disabled
                    on:click=on_attest
                >
                    {move || status.get().label()}
                </button>
            </td>
        </tr>
    }
}

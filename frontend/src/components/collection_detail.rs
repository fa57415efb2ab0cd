//! `/collections/:edition` - one collection with the tokens the wallet holds

use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_params_map, use_query_map, A};
use nftree_core::{resolve_image_uri, Indexer, Project, ProjectIndex, PLACEHOLDER_IMAGE};

use crate::config::{INDEXER_URL, IPFS_GATEWAY};
use crate::services::GraphQlIndexer;
use crate::types::{AppError, AppResult, AttestedEditions, HomeState};

#[component]
pub fn CollectionDetail() -> impl IntoView {
    let home = expect_context::<HomeState>();
    let attested_editions = expect_context::<AttestedEditions>();
    let params = use_params_map();
    let query = use_query_map();

    let edition = move || params.with(|p| p.get("edition").cloned().unwrap_or_default());
    let flagged_attested = move || query.with(|q| q.get("isAttested").map(|v| v == "true").unwrap_or(false));
    let attested = create_memo(move |_| flagged_attested() || attested_editions.contains(&edition()));

    // Reuse the home page's projects; a direct visit asks the indexer
    let project = create_local_resource(edition, move |edition| async move {
        let known = home
            .data
            .with_untracked(|data| data.as_ref().map(|d| d.projects.get(&edition).cloned()));
        match known {
            Some(project) => Ok(project),
            None => fetch_project(&edition).await,
        }
    });

    let tokens = move || {
        let edition = edition();
        home.data.with(|data| {
            data.as_ref()
                .map(|d| d.tokens_of(&edition).into_iter().map(|c| c.token_id.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <Title text="Collection"/>
        <div class="container mx-auto max-w-5xl px-4">
            <A href="/" class="text-sm text-indigo-600">"← My Collections"</A>
            {move || match project.get() {
                None => view! { <p class="mt-5 text-sm text-gray-500">"Loading..."</p> }.into_view(),
                Some(Err(e)) => view! {
                    <div class="mt-5 rounded-md bg-red-50 p-4 text-sm text-red-700" role="alert">{e.to_string()}</div>
                }
                .into_view(),
                Some(Ok(project)) => {
                    let image = resolve_image_uri(
                        project.as_ref().and_then(|p| p.image_uri.as_deref()),
                        IPFS_GATEWAY,
                    );
                    let vault = project
                        .as_ref()
                        .and_then(|p| p.vault.as_ref())
                        .map(|v| v.id.clone())
                        .unwrap_or_else(|| "No vault".to_string());
                    view! {
                        <div class="mt-5 flex gap-6">
                            <img
                                class="h-40 w-40 rounded-lg object-cover"
                                src=image
                                on:error=|ev| {
                                    use wasm_bindgen::JsCast;
                                    if let Some(img) = ev
                                        .target()
                                        .and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok())
                                    {
                                        if !img.src().ends_with(PLACEHOLDER_IMAGE) {
                                            img.set_src(PLACEHOLDER_IMAGE);
                                        }
                                    }
                                }
                            />
                            <dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-2 text-sm">
                                <dt class="font-semibold text-gray-900">"Edition"</dt>
                                <dd class="font-mono text-gray-600">{edition}</dd>
                                <dt class="font-semibold text-gray-900">"Vault"</dt>
                                <dd class="font-mono text-gray-600">{vault}</dd>
                                <dt class="font-semibold text-gray-900">"Status"</dt>
                                <dd class="text-gray-600">
                                    {move || if attested.get() { "Attested" } else { "Not attested" }}
                                </dd>
                                <dt class="font-semibold text-gray-900">"Your tokens"</dt>
                                <dd class="text-gray-600">
                                    {move || {
                                        let tokens = tokens();
                                        if tokens.is_empty() { "None known".to_string() } else { tokens.join(", ") }
                                    }}
                                </dd>
                            </dl>
                        </div>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

async fn fetch_project(edition: &str) -> AppResult<Option<Project>> {
    let projects = GraphQlIndexer::new(INDEXER_URL)
        .all_projects()
        .await
        .map_err(AppError::from)?;
    Ok(ProjectIndex::new(projects).get(edition).cloned())
}

//! Loading placeholder shown while the home page fetches

use leptos::*;

/// Rows in the placeholder table.
const SHIMMER_ROWS: usize = 4;

#[component]
pub fn TableShimmer() -> impl IntoView {
    view! {
        <div class="-mx-4 mt-5 animate-pulse ring-1 ring-gray-300 sm:mx-0 sm:rounded-lg" aria-busy="true">
            {(0..SHIMMER_ROWS)
                .map(|_| view! {
                    <div class="flex items-center gap-3 border-t border-gray-200 px-3 py-3.5 first:border-t-0">
                        <div class="h-9 w-9 rounded-full bg-gray-200"></div>
                        <div class="h-3 w-1/3 rounded bg-gray-200"></div>
                        <div class="ml-auto h-7 w-20 rounded-md bg-gray-200"></div>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

//! Call-to-action banner on top of the home page

use leptos::*;

#[component]
pub fn HomeCta() -> impl IntoView {
    view! {
        <div class="hero rounded-lg bg-indigo-600 px-6 py-8 text-white shadow-lg">
            <h1 class="text-3xl font-bold">"Attest the collections you believe in"</h1>
            <p class="subtitle mt-2 text-indigo-100">
                "Every NFTree you hold can be attested on-chain. "
                "Your vote is recorded by the collection's vault and signed with your wallet."
            </p>
        </div>
    }
}

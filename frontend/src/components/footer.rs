//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="mt-12 flex items-center justify-between border-t border-gray-200 py-6 text-sm text-gray-500">
            <div>"NFTree • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links flex gap-4">
                <a href="https://github.com/nftree" class="footer-link" target="_blank">
                    "GitHub"
                </a>
            </div>
        </footer>
    }
}

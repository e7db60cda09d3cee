//! Fallback for paths with no route entry.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

pub const NOT_FOUND_TEXT: &str = "Page not found.";

/// Rendered by the `<Routes>` fallback during client-side navigation.
/// Server requests for unknown paths never reach Leptos; axum answers 404.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Not Found"/>
        <section class="page page--not-found">
            <h1>{NOT_FOUND_TEXT}</h1>
            <nav class="page-nav">
                <A href="/" attr:class="page-nav__link">"Back to start"</A>
            </nav>
        </section>
    }
}

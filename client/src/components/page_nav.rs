//! Navigation links between the routed views.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::View;

/// Views linked from `current`, in route-table order.
#[must_use]
pub fn nav_targets(current: View) -> Vec<View> {
    View::ALL.into_iter().filter(|view| *view != current).collect()
}

/// Link bar shown at the bottom of every page.
#[component]
pub fn PageNav(current: View) -> impl IntoView {
    view! {
        <nav class="page-nav">
            {nav_targets(current)
                .into_iter()
                .map(|view| {
                    view! {
                        <A href=view.path() attr:class="page-nav__link">
                            {view.title()}
                        </A>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
#[path = "page_nav_test.rs"]
mod tests;

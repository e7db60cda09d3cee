//! Root application component with routing.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Redirect, Route, Router, Routes};

use crate::pages::not_found::NotFoundPage;
use crate::pages::render_view;
use crate::routes::{self, View};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root-path redirect taken from the route table.
#[component]
fn DefaultRedirect() -> impl IntoView {
    let to = routes::default_redirect().unwrap_or(View::SignIn.path());
    view! { <Redirect path=to/> }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/steam-companion.css"/>
        <Title text="Steam Companion"/>

        <Router>
            <main class="app">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=DefaultRedirect/>
                    <Route
                        path=StaticSegment(View::EnterSteamId.segment())
                        view=|| render_view(View::EnterSteamId)
                    />
                    <Route path=StaticSegment(View::SignIn.segment()) view=|| render_view(View::SignIn)/>
                    <Route path=StaticSegment(View::HomePage.segment()) view=|| render_view(View::HomePage)/>
                </Routes>
            </main>
        </Router>
    }
}

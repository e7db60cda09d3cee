//! Steam identifier entry screen.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::page_nav::PageNav;
use crate::routes::View;

#[component]
pub fn EnterSteamIdPage() -> impl IntoView {
    view! {
        <Title text=View::EnterSteamId.title()/>
        <section class="page page--enter-steam-id">
            <h1>{View::EnterSteamId.title()}</h1>
            <PageNav current=View::EnterSteamId/>
        </section>
    }
}

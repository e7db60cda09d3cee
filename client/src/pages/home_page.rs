//! Home screen reached after sign-in.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::page_nav::PageNav;
use crate::routes::View;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text=View::HomePage.title()/>
        <section class="page page--home">
            <h1>{View::HomePage.title()}</h1>
            <PageNav current=View::HomePage/>
        </section>
    }
}

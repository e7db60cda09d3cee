//! Sign-in screen; the default landing route.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::page_nav::PageNav;
use crate::routes::View;

#[component]
pub fn SignInPage() -> impl IntoView {
    view! {
        <Title text=View::SignIn.title()/>
        <section class="page page--sign-in">
            <h1>{View::SignIn.title()}</h1>
            <PageNav current=View::SignIn/>
        </section>
    }
}
